//! Archive encoding for backup bundles
//!
//! The backup manager only knows how to "open a bundle, add files, finish";
//! the container format lives behind [`ArchiveEncoder`]. Bundles are written
//! as zip files by default.

mod zip_bundle;

use std::path::Path;

use crate::error::BackupResult;

pub use zip_bundle::ZipEncoder;

/// Creates bundle writers for a specific archive format
pub trait ArchiveEncoder: Send + Sync {
    /// File extension of produced bundles, without the leading dot
    fn extension(&self) -> &str;

    /// Start a new, empty bundle at `destination`
    fn create(&self, destination: &Path) -> BackupResult<Box<dyn BundleWriter>>;
}

/// An open bundle being filled with entries
pub trait BundleWriter {
    /// Copy the file at `source` into the bundle as `entry_name`
    fn add_file(&mut self, source: &Path, entry_name: &str) -> BackupResult<()>;

    /// Write the archive trailer and flush everything to disk
    fn finish(self: Box<Self>) -> BackupResult<()>;
}
