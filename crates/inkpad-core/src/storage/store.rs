//! Loading and saving the notebook document.
//!
//! The whole document, including every page's undo and redo stacks, lives
//! in a single storage slot and is rewritten after every change.

use crate::document::Document;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Default storage slot for the notebook.
pub const DEFAULT_STORAGE_KEY: &str = "inkpad_notebook_v1";

/// Reads and writes a [`Document`] in one storage slot.
pub struct DocumentStore<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Slot holding the serialized document.
    key: String,
    /// Successful saves since creation.
    save_count: usize,
}

impl<S: Storage> DocumentStore<S> {
    /// Create a store using [`DEFAULT_STORAGE_KEY`].
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store using a custom slot.
    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            save_count: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Load the stored document.
    ///
    /// Returns `None` when nothing is stored or the stored value cannot be
    /// read or parsed. Failures are logged, never returned.
    pub fn load_document(&self) -> Option<Document> {
        let json = match self.storage.read(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::debug!("No document stored under {}", self.key);
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read document {}: {}", self.key, e);
                return None;
            }
        };

        match Document::from_json(&json) {
            Ok(document) => {
                log::info!(
                    "Loaded document {} ({} pages)",
                    self.key,
                    document.page_count()
                );
                Some(document)
            }
            Err(e) => {
                log::warn!("Stored document {} is corrupt: {}", self.key, e);
                None
            }
        }
    }

    /// Load the stored document, or create a fresh one if there is none.
    pub fn load_or_default(&self) -> Document {
        self.load_document().unwrap_or_else(|| {
            log::info!("Starting a new document");
            Document::new()
        })
    }

    /// Serialize the whole document and overwrite the stored value.
    pub fn save_document(&mut self, document: &Document) -> StorageResult<()> {
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.write(&self.key, &json)?;
        self.save_count += 1;
        log::debug!("Saved document {} ({} bytes)", self.key, json.len());
        Ok(())
    }

    /// Delete the stored document.
    pub fn remove_document(&self) -> StorageResult<()> {
        self.storage.remove(&self.key)
    }
}
