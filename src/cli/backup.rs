//! Backup CLI commands
//!
//! Implements the commands that run the scheduler, take one-off backups and
//! inspect the backup directory.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;

use crate::backup::{BackupManager, BackupScheduler};
use crate::config::BackupParameters;
use crate::display::{format_bundle_list, format_interval};
use crate::error::{BackupError, BackupResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Run the scheduler until Enter is pressed
    Run,

    /// Create one backup and sweep expired files right now
    Once,

    /// List bundles in the backup directory
    List,

    /// Add files to the backup list
    Add {
        /// Files to include in every bundle
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(config_path: &Path, cmd: BackupCommands) -> BackupResult<()> {
    let params = load_parameters(config_path)?;

    match cmd {
        BackupCommands::Run => {
            let mut scheduler = BackupScheduler::new(params);
            scheduler.start()?;

            let params = scheduler.parameters();
            println!(
                "Backing up {} file(s) to {} every {}.",
                params.file_list.len(),
                params.backup_path.display(),
                format_interval(params.backup_frequency)
            );
            println!("Press Enter to stop.");

            // EOF on stdin stops the scheduler as well
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;

            scheduler.stop();
            println!("Scheduler stopped.");
        }

        BackupCommands::Once => {
            params.validate()?;
            let manager = BackupManager::new(params);
            let now = Local::now();

            let created = manager.create_backup(&now)?;
            println!(
                "Backup created: {} ({} file(s))",
                created.path.display(),
                created.entries
            );
            for missing in &created.skipped {
                println!("  Skipped missing file: {}", missing.display());
            }

            let report = manager.sweep_expired(&now)?;
            println!("Expired backups deleted: {}", report.deleted.len());
            for failure in &report.failures {
                eprintln!("  {}", failure);
            }
        }

        BackupCommands::List => {
            let manager = BackupManager::new(params);
            let bundles = manager.list_bundles()?;

            println!("Backups in {}", manager.backup_dir().display());
            println!();
            println!(
                "{}",
                format_bundle_list(&bundles, Local::now().naive_local())
            );
        }

        BackupCommands::Add { files } => {
            let mut params = params;
            for file in files {
                if params.file_list.contains(&file) {
                    println!("Already listed: {}", file.display());
                    continue;
                }
                println!("Added: {}", file.display());
                params.add_file(file);
            }

            params.validate()?;
            params.save(config_path)?;
        }
    }

    Ok(())
}

fn load_parameters(config_path: &Path) -> BackupResult<BackupParameters> {
    if !config_path.exists() {
        return Err(BackupError::Config(format!(
            "No configuration at {}. Run 'filebackup init' first.",
            config_path.display()
        )));
    }
    BackupParameters::load(config_path)
}
