//! Local Storage
//!
//! A small persistent key/value store backed by a JSON file, playing the
//! role browser local storage plays for a web client. Every call reads or
//! writes the file directly; nothing is cached in memory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage key holding the bearer token
pub const DEFAULT_TOKEN_KEY: &str = "authToken";

/// Errors from the local storage file
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse storage file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Failed to serialize storage contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON-file key/value store
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

/// Default storage location under the platform data directory
pub fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("graphlink").join("storage.json"))
        .unwrap_or_else(|| PathBuf::from("./graphlink_storage.json"))
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value; a missing file reads as empty storage
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    /// Insert or replace a value
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    /// Remove a value, returning whether it was present
    pub fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
        let mut items = self.load()?;
        let removed = items.remove(key).is_some();
        if removed {
            self.save(&items)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| StorageError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(items)?;

        // Readers never observe a half-written file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
