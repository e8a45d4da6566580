//! String key-value stores.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while flushing a store to disk.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write store file: {0}")]
    WriteError(#[from] io::Error),

    #[error("Failed to serialize store: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Result type for store flush operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Synchronous string key-value persistence.
///
/// Writes are best effort: implementations log and carry on rather than
/// surface storage failures to the state machine.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// File-backed store: one JSON object holding all keys.
///
/// Every mutation flushes the whole map atomically (write to temp file, then
/// rename). An unreadable or unparsable file degrades to an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing contents.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        Self { path, values }
    }

    fn load(path: &Path) -> HashMap<String, String> {
        if !path.exists() {
            return HashMap::new();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(values) => {
                    tracing::debug!(keys = values.len(), "loaded store from {}", path.display());
                    values
                }
                Err(e) => {
                    tracing::warn!("Failed to parse store file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read store file {}: {}", path.display(), e);
                HashMap::new()
            }
        }
    }

    fn flush(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.values)?;

        // Write atomically via temp file
        let temp_file = self.path.with_extension("json.tmp");
        fs::write(&temp_file, &json)?;
        fs::rename(&temp_file, &self.path)?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush store to {}: {}", self.path.display(), e);
        }
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush store to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("autoRemove"), None);

        store.set("autoRemove", "false");
        assert_eq!(store.get("autoRemove"), Some("false".to_string()));

        store.remove("autoRemove");
        assert_eq!(store.get("autoRemove"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wheel.json");

        {
            let mut store = JsonFileStore::new(&path);
            store.set("selectedItem", "Frank");
        }

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("selectedItem"), Some("Frank".to_string()));
    }

    #[test]
    fn file_store_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wheel.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("selectedItem"), None);

        // Still writable after a bad load
        store.set("selectedItem", "Ivo");
        assert_eq!(store.get("selectedItem"), Some("Ivo".to_string()));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("wheelItems"), None);
    }
}
