//! Best-effort local persistence behind an explicit key-value interface.
//!
//! Callers get typed `Result`s and decide for themselves when to fall back
//! to defaults; nothing here suppresses failures silently.

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

/// Storage failures, distinct from API errors so callers can tell a broken
/// state file from a broken network.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted stored value for '{key}': {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Capability-scoped key-value persistence
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>>;

    /// Write a value, replacing any previous one.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Well-known keys persisted by the studio
pub mod keys {
    /// The chat's process-wide generation defaults
    pub const GENERATION_CONFIG: &str = "generation_config";
    /// Full studio form state, restored on the next session
    pub const STUDIO_FORM: &str = "studio_form";
}

/// One JSON document on disk holding every key.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles across concurrent callers
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    fn read_document(&self) -> StorageResult<HashMap<String, serde_json::Value>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupted {
                key: "<document>".to_string(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write_document(&self, document: &HashMap<String, serde_json::Value>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| {
            StorageError::Serialize { key: "<document>".to_string(), source }
        })?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let _guard = self.lock.lock();
        let document = self.read_document()?;
        match document.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| StorageError::Corrupted { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let _guard = self.lock.lock();
        let mut document = self.read_document().unwrap_or_default();
        let value = serde_json::to_value(value)
            .map_err(|source| StorageError::Serialize { key: key.to_string(), source })?;
        document.insert(key.to_string(), value);
        self.write_document(&document)?;
        debug!(key = %key, path = ?self.path, "Persisted value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.lock();
        let mut document = self.read_document().unwrap_or_default();
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.values.lock().get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| StorageError::Corrupted { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|source| StorageError::Serialize { key: key.to_string(), source })?;
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));

        let config = GenerationConfig { number_of_images: 2, ..Default::default() };
        store.set(keys::GENERATION_CONFIG, &config).unwrap();

        let loaded: Option<GenerationConfig> = store.get(keys::GENERATION_CONFIG).unwrap();
        assert_eq!(loaded.unwrap().number_of_images, 2);
    }

    #[test]
    fn test_studio_form_state_round_trip() {
        use crate::prompts::studio::{PhotorealisticRequest, SequenceType};

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));

        let mut form = PhotorealisticRequest {
            prompt: "um farol na tempestade".to_string(),
            environment: "costa rochosa".to_string(),
            number_of_images: 2,
            ..Default::default()
        };
        form.conceptual.sequence_type = SequenceType::Timeline;
        store.set(keys::STUDIO_FORM, &form).unwrap();

        let restored: Option<PhotorealisticRequest> = store.get(keys::STUDIO_FORM).unwrap();
        assert_eq!(restored.unwrap(), form);
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        let value: Option<GenerationConfig> = store.get("never_written").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupted_value_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        store.set("count", &"not a number").unwrap();

        let result: StorageResult<Option<u32>> = store.get("count");
        assert!(matches!(result, Err(StorageError::Corrupted { .. })));
    }

    #[test]
    fn test_corrupted_document_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = FileStore::new(&path);
        let result: StorageResult<Option<u32>> = store.get("anything");
        assert!(matches!(result, Err(StorageError::Corrupted { .. })));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("k", &1u32).unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        let value: Option<u32> = store.get("k").unwrap();
        assert!(value.is_none());
    }
}
