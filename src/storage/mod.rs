//! Storage layer for filebackup
//!
//! Provides the filesystem capability the backup manager works through and
//! JSON file helpers with atomic writes.

pub mod file_io;
pub mod filesystem;

pub use file_io::{read_json_required, temp_path_for, write_json_atomic};
pub use filesystem::{Filesystem, LocalFilesystem};
