//! Backup and restore commands for CLI.

use clap::Subcommand;
use rosterroom_core::{storage, Config};

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Export the whole document to a dated JSON file
    Backup {
        /// Output directory (default: configured backup dir, else current)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Replace the whole document with a backup file
    Restore {
        /// Backup file to restore from
        file: std::path::PathBuf,
    },
    /// Print the location of the persisted document
    Path,
}

pub fn run(action: DataAction) -> CliResult {
    match action {
        DataAction::Backup { out } => {
            let store = open_store()?;
            let dir = out
                .or_else(|| {
                    Config::load_or_default()
                        .backup
                        .directory
                        .map(std::path::PathBuf::from)
                })
                .unwrap_or_else(|| std::path::PathBuf::from("."));
            let path = store.backup_to(&dir, chrono::Local::now().date_naive())?;
            println!("Backup written to {}", path.display());
        }
        DataAction::Restore { file } => {
            let mut store = open_store()?;
            store.restore_from(&file)?;
            let doc = store.document();
            println!(
                "Restored {} admins, {} courses, {} schedules",
                doc.admins.len(),
                doc.courses.len(),
                doc.schedules.len()
            );
        }
        DataAction::Path => {
            println!("{}", storage::data_dir()?.join("document.json").display());
        }
    }
    Ok(())
}
