//! Backup system for filebackup
//!
//! Provides rolling backups of a fixed set of files with age-based expiry.
//!
//! # Architecture
//!
//! The backup system consists of two main components:
//!
//! - `BackupManager`: Creates bundles, sweeps expired files and lists bundles
//! - `BackupScheduler`: Drives a manager from a background thread
//!
//! # Bundle Format
//!
//! Bundles are zip archives named `<backup_name>_<YYYYMMDD_HHMMSS>.zip`
//! holding one entry per listed file that existed at backup time, stored
//! under its base name.
//!
//! # Expiry
//!
//! Every poll, any file directly inside the backup directory whose creation
//! time is at least `expiry` old is deleted. The directory should be
//! dedicated to one scheduler.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use filebackup::backup::BackupScheduler;
//! use filebackup::config::BackupParameters;
//!
//! let params = BackupParameters::new("/var/backups/app")
//!     .with_files(["/etc/app/config.toml", "/var/lib/app/state.db"])
//!     .with_frequency(Duration::from_secs(3600))
//!     .with_expiry(Duration::from_secs(7 * 24 * 3600));
//!
//! let mut scheduler = BackupScheduler::new(params);
//! scheduler.start()?;
//! // ... host does its work ...
//! scheduler.stop();
//! ```

mod manager;
mod naming;
mod scheduler;

pub use manager::{BackupManager, BundleInfo, CreatedBundle, SweepReport};
pub use naming::{bundle_file_name, parse_bundle_timestamp};
pub use scheduler::{BackupScheduler, ErrorHook, DEFAULT_POLL_INTERVAL};
