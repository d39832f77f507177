//! Custom error types for filebackup
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for filebackup operations
#[derive(Error, Debug)]
pub enum BackupError {
    /// Invalid backup parameters or an unusable configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backup directory cannot be created, read, or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// A bundle could not be written
    #[error("Archive error: {0}")]
    Archive(String),

    /// An expired file could not be removed
    #[error("Failed to delete {}: {message}", path.display())]
    Deletion { path: PathBuf, message: String },

    /// The background worker could not be launched
    #[error("Worker error: {0}")]
    Worker(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl BackupError {
    /// Create a deletion error for a specific file
    pub fn deletion(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Deletion {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is an archive error
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }

    /// Check if this is a deletion error
    pub fn is_deletion(&self) -> bool {
        matches!(self, Self::Deletion { .. })
    }
}

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<zip::result::ZipError> for BackupError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

/// Result type alias for filebackup operations
pub type BackupResult<T> = Result<T, BackupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackupError::Config("at least one file required".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: at least one file required"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_deletion_error() {
        let err = BackupError::deletion("/backups/old.zip", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to delete /backups/old.zip: permission denied"
        );
        assert!(err.is_deletion());
        assert!(!err.is_storage());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let backup_err: BackupError = io_err.into();
        assert!(matches!(backup_err, BackupError::Io(_)));
    }

    #[test]
    fn test_from_zip_error() {
        let zip_err = zip::result::ZipError::FileNotFound;
        let backup_err: BackupError = zip_err.into();
        assert!(backup_err.is_archive());
    }
}
