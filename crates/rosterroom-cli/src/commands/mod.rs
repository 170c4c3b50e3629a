pub mod admin;
pub mod batch;
pub mod config;
pub mod course;
pub mod data;
pub mod schedule;

use rosterroom_core::{JsonFileBackend, Store};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the store over the document in the data directory.
pub fn open_store() -> Result<Store<JsonFileBackend>, Box<dyn std::error::Error>> {
    let backend = JsonFileBackend::in_data_dir()?;
    tracing::debug!(path = %backend.path().display(), "opening document store");
    Ok(Store::open(backend)?)
}
