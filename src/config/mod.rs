//! Configuration module for filebackup
//!
//! This module provides the backup parameters consumed by the scheduler
//! and their JSON persistence for the command-line host.

pub mod parameters;

pub use parameters::{entry_name, BackupParameters};
