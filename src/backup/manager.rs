//! Backup manager for filebackup
//!
//! Creates timestamped bundles of the configured files and deletes files in
//! the backup directory once they reach the configured age. The scheduler
//! drives these operations on its poll cadence; the command-line host calls
//! them directly for one-shot runs.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime};
use tracing::{debug, info, warn};

use super::naming::{bundle_file_name, parse_bundle_timestamp};
use crate::archive::{ArchiveEncoder, BundleWriter, ZipEncoder};
use crate::config::parameters::{entry_name, BackupParameters};
use crate::error::{BackupError, BackupResult};
use crate::storage::file_io::temp_path_for;
use crate::storage::filesystem::{Filesystem, LocalFilesystem};

/// Metadata about a bundle found in the backup directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleInfo {
    /// Bundle filename
    pub filename: String,
    /// Full path to bundle
    pub path: PathBuf,
    /// Timestamp encoded in the filename (local time)
    pub created_at: NaiveDateTime,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Result of a successful backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBundle {
    /// Final path of the bundle
    pub path: PathBuf,
    /// Number of files written into the bundle
    pub entries: usize,
    /// Listed files that did not exist at archiving time
    pub skipped: Vec<PathBuf>,
}

/// Outcome of an expiry sweep
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Files that were deleted
    pub deleted: Vec<PathBuf>,
    /// Files that had expired (or could not be inspected) but were not deleted
    pub failures: Vec<BackupError>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Creates bundles and enforces expiry for one set of parameters
pub struct BackupManager {
    parameters: BackupParameters,
    encoder: Arc<dyn ArchiveEncoder>,
    filesystem: Arc<dyn Filesystem>,
}

impl BackupManager {
    /// Create a manager writing zip bundles to the local disk
    pub fn new(parameters: BackupParameters) -> Self {
        Self::with_capabilities(parameters, Arc::new(ZipEncoder), Arc::new(LocalFilesystem))
    }

    /// Create a manager with a custom encoder and filesystem
    pub fn with_capabilities(
        parameters: BackupParameters,
        encoder: Arc<dyn ArchiveEncoder>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            parameters,
            encoder,
            filesystem,
        }
    }

    pub fn parameters(&self) -> &BackupParameters {
        &self.parameters
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.parameters.backup_path
    }

    /// Create the backup directory if it does not exist yet
    pub fn ensure_backup_dir(&self) -> BackupResult<()> {
        self.filesystem
            .create_dir_all(self.backup_dir())
            .map_err(|e| {
                BackupError::Storage(format!(
                    "Failed to create backup directory {}: {}",
                    self.backup_dir().display(),
                    e
                ))
            })
    }

    /// Path a bundle created at `timestamp` is stored under
    pub fn bundle_path(&self, timestamp: &DateTime<Local>) -> PathBuf {
        self.backup_dir().join(bundle_file_name(
            &self.parameters.backup_name,
            timestamp,
            self.encoder.extension(),
        ))
    }

    /// Create a bundle of all listed files that currently exist
    ///
    /// The bundle is written under a temporary name and only renamed to its
    /// final name once it is complete, so the backup directory never holds a
    /// partial bundle under a bundle name.
    pub fn create_backup(&self, timestamp: &DateTime<Local>) -> BackupResult<CreatedBundle> {
        self.ensure_backup_dir()?;

        let final_path = self.bundle_path(timestamp);
        let temp_path = temp_path_for(&final_path);

        let writer = self.encoder.create(&temp_path)?;
        let (entries, skipped) = match self.write_entries(writer) {
            Ok(written) => written,
            Err(e) => {
                let _ = self.filesystem.remove_file(&temp_path);
                return Err(e);
            }
        };

        self.filesystem
            .rename(&temp_path, &final_path)
            .map_err(|e| {
                let _ = self.filesystem.remove_file(&temp_path);
                BackupError::Storage(format!(
                    "Failed to move bundle into place at {}: {}",
                    final_path.display(),
                    e
                ))
            })?;

        info!(
            path = %final_path.display(),
            entries,
            skipped = skipped.len(),
            "Backup bundle created"
        );

        Ok(CreatedBundle {
            path: final_path,
            entries,
            skipped,
        })
    }

    fn write_entries(
        &self,
        mut writer: Box<dyn BundleWriter>,
    ) -> BackupResult<(usize, Vec<PathBuf>)> {
        let mut seen = HashSet::new();
        let mut entries = 0;
        let mut skipped = Vec::new();

        for source in &self.parameters.file_list {
            if !seen.insert(source.as_path()) {
                continue;
            }

            if !self.filesystem.file_exists(source) {
                debug!(file = %source.display(), "Source file missing, skipping");
                skipped.push(source.clone());
                continue;
            }

            let name = entry_name(source).ok_or_else(|| {
                BackupError::Archive(format!("'{}' does not name a file", source.display()))
            })?;
            writer.add_file(source, &name)?;
            entries += 1;
        }

        writer.finish()?;
        Ok((entries, skipped))
    }

    /// Delete every file in the backup directory that has reached the expiry age
    ///
    /// Each file is handled independently: a file that cannot be inspected or
    /// deleted is recorded in the report and the sweep moves on. Any file in
    /// the directory is eligible, not only bundles.
    pub fn sweep_expired(&self, now: &DateTime<Local>) -> BackupResult<SweepReport> {
        let files = self.filesystem.list_files(self.backup_dir()).map_err(|e| {
            BackupError::Storage(format!(
                "Failed to read backup directory {}: {}",
                self.backup_dir().display(),
                e
            ))
        })?;

        let mut report = SweepReport::default();

        for path in files {
            let created = match self.filesystem.created(&path) {
                Ok(created) => created,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Cannot read creation time");
                    report
                        .failures
                        .push(BackupError::deletion(&path, format!("cannot read creation time: {}", e)));
                    continue;
                }
            };

            if !self.is_expired(created, now) {
                continue;
            }

            match self.filesystem.remove_file(&path) {
                Ok(()) => {
                    info!(file = %path.display(), "Expired backup deleted");
                    report.deleted.push(path);
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Failed to delete expired backup");
                    report.failures.push(BackupError::deletion(&path, e));
                }
            }
        }

        if report.deleted.is_empty() && report.failures.is_empty() {
            debug!("No expired backups");
        }

        Ok(report)
    }

    fn is_expired(&self, created: DateTime<Local>, now: &DateTime<Local>) -> bool {
        // A creation time in the future means the file is not old at all
        match now.signed_duration_since(created).to_std() {
            Ok(age) => age >= self.parameters.expiry,
            Err(_) => false,
        }
    }

    /// List bundles produced with this configuration's naming, newest first
    pub fn list_bundles(&self) -> BackupResult<Vec<BundleInfo>> {
        let files = match self.filesystem.list_files(self.backup_dir()) {
            Ok(files) => files,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BackupError::Storage(format!(
                    "Failed to read backup directory {}: {}",
                    self.backup_dir().display(),
                    e
                )))
            }
        };

        let mut bundles: Vec<BundleInfo> = files
            .into_iter()
            .filter_map(|path| self.parse_bundle_info(&path))
            .collect();

        // Sort by date, newest first
        bundles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(bundles)
    }

    fn parse_bundle_info(&self, path: &Path) -> Option<BundleInfo> {
        let filename = path.file_name()?.to_string_lossy().into_owned();
        let created_at = parse_bundle_timestamp(
            &self.parameters.backup_name,
            self.encoder.extension(),
            &filename,
        )?;
        let size_bytes = self.filesystem.size(path).ok()?;

        Some(BundleInfo {
            filename,
            path: path.to_path_buf(),
            created_at,
            size_bytes,
        })
    }
}
