//! filebackup - Periodic rolling file backups
//!
//! This library archives a configured set of files into timestamped zip
//! bundles on a fixed cadence and deletes bundles once they pass a
//! configured age. The work runs on a background thread owned by a
//! [`BackupScheduler`] that the host starts and stops on demand.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Backup parameters and their JSON persistence
//! - `error`: Custom error types
//! - `backup`: Bundle creation, expiry sweep and the scheduler loop
//! - `archive`: Archive encoder capability and the zip implementation
//! - `storage`: Filesystem capability and atomic file helpers
//! - `clock`: Wall-clock capability
//! - `cli`: Command handlers for the `filebackup` binary
//! - `display`: Terminal formatting for bundle listings
//!
//! # Example
//!
//! ```rust,ignore
//! use filebackup::{BackupParameters, BackupScheduler};
//!
//! let params = BackupParameters::new("Backup").with_files(["file1.txt", "file2.txt"]);
//! let mut scheduler = BackupScheduler::new(params);
//! scheduler.start()?;
//! ```

pub mod archive;
pub mod backup;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod storage;

pub use backup::{BackupManager, BackupScheduler};
pub use config::BackupParameters;
pub use error::{BackupError, BackupResult};
