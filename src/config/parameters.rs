//! Backup parameters
//!
//! The configuration snapshot a scheduler run works from: which files to
//! archive, where bundles go, how often to create them, and how long they
//! live. Persisted as JSON by the command-line host.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BackupError;
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// Parameters needed for backing up a set of files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupParameters {
    /// Files to archive into every bundle
    #[serde(default)]
    pub file_list: Vec<PathBuf>,

    /// Directory bundles are written to (created if missing)
    #[serde(default = "default_backup_path")]
    pub backup_path: PathBuf,

    /// Minimum time between two successive bundles
    #[serde(
        default = "default_backup_frequency",
        rename = "backup_frequency_secs",
        with = "duration_secs"
    )]
    pub backup_frequency: Duration,

    /// Prefix of generated bundle file names
    #[serde(default = "default_backup_name")]
    pub backup_name: String,

    /// Age at which a file in the backup directory is deleted
    #[serde(default = "default_expiry", rename = "expiry_secs", with = "duration_secs")]
    pub expiry: Duration,
}

fn default_backup_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("Backup")
}

fn default_backup_frequency() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_backup_name() -> String {
    "Backup".to_string()
}

fn default_expiry() -> Duration {
    Duration::from_secs(30 * 24 * 60 * 60)
}

impl Default for BackupParameters {
    fn default() -> Self {
        Self {
            file_list: Vec::new(),
            backup_path: default_backup_path(),
            backup_frequency: default_backup_frequency(),
            backup_name: default_backup_name(),
            expiry: default_expiry(),
        }
    }
}

impl BackupParameters {
    /// Create parameters for `backup_path` with default cadence and expiry
    pub fn new(backup_path: impl Into<PathBuf>) -> Self {
        Self {
            backup_path: backup_path.into(),
            ..Self::default()
        }
    }

    /// Add a file to the list of files to archive
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.file_list.push(path.into());
        self
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.file_list.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_frequency(mut self, frequency: Duration) -> Self {
        self.backup_frequency = frequency;
        self
    }

    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.backup_name = name.into();
        self
    }

    /// Check that the parameters can drive a scheduler run
    ///
    /// Identical paths listed twice are fine (they are archived once), but two
    /// different paths with the same file name would map to the same entry
    /// inside a bundle and are rejected.
    pub fn validate(&self) -> Result<(), BackupError> {
        if self.file_list.is_empty() {
            return Err(BackupError::Config(
                "at least one file required to create a backup".into(),
            ));
        }

        if self.backup_name.trim().is_empty() {
            return Err(BackupError::Config("backup name must not be empty".into()));
        }

        if self.backup_name.contains(['/', '\\']) {
            return Err(BackupError::Config(format!(
                "backup name '{}' must not contain path separators",
                self.backup_name
            )));
        }

        let mut seen: HashMap<String, &Path> = HashMap::new();
        for path in &self.file_list {
            let entry = entry_name(path).ok_or_else(|| {
                BackupError::Config(format!("'{}' does not name a file", path.display()))
            })?;

            match seen.get(&entry) {
                Some(previous) if *previous != path.as_path() => {
                    return Err(BackupError::Config(format!(
                        "'{}' and '{}' would both be stored as '{}'",
                        previous.display(),
                        path.display(),
                        entry
                    )));
                }
                Some(_) => {}
                None => {
                    seen.insert(entry, path.as_path());
                }
            }
        }

        Ok(())
    }

    /// Load parameters from a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, BackupError> {
        read_json_required(path)
    }

    /// Save parameters to a JSON configuration file
    pub fn save(&self, path: &Path) -> Result<(), BackupError> {
        write_json_atomic(path, self)
    }
}

/// Name a source file is stored under inside a bundle (its base name)
pub fn entry_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
