// LeadTrack - platform/store.rs
//
// Flat key-value storage. Values are opaque strings; a key is written as a
// whole, never partially.
//
// FileStore keeps one file per key under a directory:
// - writes are atomic (write temp file, rename over the final name) so a
//   crash mid-write never corrupts the previous value
// - the directory is created on first write
// - a missing file is an absent key, not an error
//
// MemoryStore backs tests and the --ephemeral CLI mode.

use crate::util::constants::{MAX_STORE_VALUE_BYTES, STORE_VALUE_EXTENSION};
use crate::util::error::StoreError;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// String-valued key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// Directory-backed store with one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{STORE_VALUE_EXTENSION}"))
    }

    fn io_err(key: &str, path: &Path, operation: &'static str, source: io::Error) -> StoreError {
        StoreError::Io {
            key: key.to_string(),
            path: path.to_path_buf(),
            operation,
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);

        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(key, path = %path.display(), "Key not present");
                return Ok(None);
            }
            Err(e) => return Err(Self::io_err(key, &path, "stat", e)),
        };

        if metadata.len() > MAX_STORE_VALUE_BYTES {
            return Err(StoreError::ValueTooLarge {
                key: key.to_string(),
                size: metadata.len(),
                max_size: MAX_STORE_VALUE_BYTES,
            });
        }

        let bytes = std::fs::read(&path).map_err(|e| Self::io_err(key, &path, "read", e))?;
        tracing::debug!(key, bytes = bytes.len(), "Read stored value");
        let value = String::from_utf8(bytes).map_err(|source| StoreError::InvalidUtf8 {
            key: key.to_string(),
            path: path.clone(),
            source,
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_size(key, value)?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Self::io_err(key, &self.dir, "create directory", e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{STORE_VALUE_EXTENSION}.tmp"));

        std::fs::write(&tmp, value.as_bytes())
            .map_err(|e| Self::io_err(key, &tmp, "write temp file", e))?;

        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            Self::io_err(key, &path, "rename", e)
        })?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(key, &path, "remove", e)),
        }
    }
}

/// Refuse values that `get` would later reject as too large.
fn check_size(key: &str, value: &str) -> Result<(), StoreError> {
    let size = value.len() as u64;
    if size > MAX_STORE_VALUE_BYTES {
        return Err(StoreError::ValueTooLarge {
            key: key.to_string(),
            size,
            max_size: MAX_STORE_VALUE_BYTES,
        });
    }
    Ok(())
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with deliberately malformed data in tests.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned {
            key: key.to_string(),
        })?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_size(key, value)?;
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned {
            key: key.to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned {
            key: key.to_string(),
        })?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store"));
        assert!(store.get("leads").unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_creates_directory_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("store"));
        store.set("leads", "[]").unwrap();
        assert_eq!(store.get("leads").unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("leads").ends_with("leads.json"));
    }

    #[test]
    fn test_file_store_overwrites_whole_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("leads", "[1,2,3]").unwrap();
        store.set("leads", "[]").unwrap();
        assert_eq!(store.get("leads").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_ignores_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("leads", "[\"old\"]").unwrap();

        let tmp = store.path_for("leads").with_extension("json.tmp");
        std::fs::write(&tmp, b"garbage").unwrap();

        store.set("leads", "[\"new\"]").unwrap();
        assert_eq!(store.get("leads").unwrap().as_deref(), Some("[\"new\"]"));
        assert!(!tmp.exists());
    }

    #[test]
    fn test_file_store_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("leads", "[]").unwrap();
        store.remove("leads").unwrap();
        store.remove("leads").unwrap();
        assert!(store.get("leads").unwrap().is_none());
    }

    #[test]
    fn test_file_store_invalid_utf8_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path_for("leads"), b"[{\"name\":\"Bad\xff\"}]").unwrap();

        let err = store.get("leads").unwrap_err();
        assert!(matches!(err, StoreError::InvalidUtf8 { .. }), "got {err:?}");
    }

    #[test]
    fn test_set_rejects_oversized_value() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let big = "x".repeat(MAX_STORE_VALUE_BYTES as usize + 1);

        let err = store.set("leads", &big).unwrap_err();
        assert!(matches!(err, StoreError::ValueTooLarge { .. }), "got {err:?}");
        assert!(!store.path_for("leads").exists());

        let memory = MemoryStore::new();
        assert!(memory.set("leads", &big).is_err());
        assert!(memory.get("leads").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::with_value("leads", "x");
        assert_eq!(store.get("leads").unwrap().as_deref(), Some("x"));
        store.set("leads", "y").unwrap();
        assert_eq!(store.get("leads").unwrap().as_deref(), Some("y"));
        store.remove("leads").unwrap();
        assert!(store.get("leads").unwrap().is_none());
    }
}
