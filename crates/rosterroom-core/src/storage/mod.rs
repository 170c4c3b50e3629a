pub mod backend;
mod config;
pub mod document;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use config::Config;
pub use document::Document;
pub use store::Store;

use std::path::PathBuf;

/// Returns `~/.config/rosterroom/`, creating it if needed.
///
/// Set ROSTERROOM_DATA_DIR to relocate all persisted state (document,
/// config, backups default), e.g. for scripting or tests.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("ROSTERROOM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("rosterroom"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
