use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use filebackup::cli::{handle_backup_command, BackupCommands};
use filebackup::config::BackupParameters;
use filebackup::display::format_parameters;

#[derive(Parser)]
#[command(
    name = "filebackup",
    version,
    about = "Periodic rolling file backups",
    long_about = "filebackup archives a list of files into timestamped zip bundles \
                  on a fixed cadence and deletes bundles once they reach a \
                  configured age."
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "FILEBACKUP_CONFIG", default_value = "filebackup.json")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show the current configuration
    Config,

    #[command(flatten)]
    Backup(BackupCommands),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "filebackup=debug"
    } else {
        "filebackup=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Init { force }) => {
            if cli.config.exists() && !force {
                println!("Configuration already exists at {}", cli.config.display());
                println!("To overwrite it, run again with --force.");
                return Ok(());
            }

            let params = BackupParameters::default();
            params.save(&cli.config)?;
            println!("Configuration written to {}", cli.config.display());
            println!();
            println!("Add files with 'filebackup add <FILE>...', then start with 'filebackup run'.");
        }
        Some(Commands::Config) => {
            let params = BackupParameters::load(&cli.config)?;
            println!("filebackup Configuration");
            println!("========================");
            println!("Config file:      {}", cli.config.display());
            print!("{}", format_parameters(&params));
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&cli.config, cmd)?;
        }
        None => {
            println!("filebackup - Periodic rolling file backups");
            println!();
            println!("Run 'filebackup --help' for usage information.");
            println!("Run 'filebackup init' to create a configuration.");
        }
    }

    Ok(())
}
