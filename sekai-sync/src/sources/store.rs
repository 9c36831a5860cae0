//! JSON file store
//!
//! Writes the catalog as a pretty-printed JSON array, entries in creation
//! order. The file is replaced atomically so a reader never sees a partial
//! write.

use crate::error::{SyncError, SyncResult};
use crate::sources::Store;
use crate::types::CatalogEntry;
use sekai_common::config::write_atomic;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Store for JsonFileStore {
    fn write(&self, entries: &[CatalogEntry]) -> SyncResult<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| SyncError::Store(format!("serialize catalog: {}", e)))?;

        write_atomic(&self.path, &bytes).map_err(|e| {
            SyncError::Store(format!("write {}: {}", self.path.display(), e))
        })?;

        info!(path = %self.path.display(), entries = entries.len(), "Catalog written");
        Ok(())
    }
}
