//! Persistence port for the application document.
//!
//! The store talks to storage through [`StorageBackend`], keeping the
//! domain logic independent of where (and whether) the document lands on
//! disk.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::data_dir;
use super::document::Document;
use crate::error::StoreError;

/// Load/save port injected into the store.
pub trait StorageBackend {
    /// `Ok(None)` means nothing has been persisted yet.
    fn load(&self) -> Result<Option<Document>, StoreError>;
    fn save(&self, document: &Document) -> Result<(), StoreError>;
}

/// Document persisted as a single JSON file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at the default location, `<data_dir>/document.json`.
    pub fn in_data_dir() -> std::io::Result<Self> {
        Ok(Self::new(data_dir()?.join("document.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let document = serde_json::from_str(&content)?;
                debug!(path = %self.path.display(), "document loaded");
                Ok(Some(document))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::ReadFailed {
                path: self.path.clone(),
                source: err,
            }),
        }
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string(document)?;
        std::fs::write(&self.path, json).map_err(|err| StoreError::WriteFailed {
            path: self.path.clone(),
            source: err,
        })?;
        debug!(path = %self.path.display(), "document saved");
        Ok(())
    }
}

/// In-memory backend for tests; counts saves so persist-on-every-change
/// can be asserted.
#[derive(Default)]
pub struct MemoryBackend {
    slot: RefCell<Option<Document>>,
    saves: Cell<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a document, as if one had been persisted.
    pub fn seeded(document: Document) -> Self {
        Self {
            slot: RefCell::new(Some(document)),
            saves: Cell::new(0),
        }
    }

    pub fn saved_document(&self) -> Option<Document> {
        self.slot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(document.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
