// Key-value persistence with get/set semantics, the only storage capability the
// dashboard relies on.
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ClientError, Result};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites any previous value under `key`.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Ephemeral store, also the test double for the file-backed one.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values. Every `set` rewrites the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store. A missing file starts empty; so does one that is not a JSON
    /// object of strings, whose content gets replaced on the next `set`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Storage file is not valid JSON, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unable to read storage file, starting empty");
                BTreeMap::new()
            }
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| ClientError::Storage(format!("Failed to encode storage file: {}", e)))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_overwrites() {
        let mut store = MemoryStore::new().with_entry("k", "old");
        store.set("k", "new".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("new".to_string()));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get("favoriteTickers").unwrap(), None);
        store.set("favoriteTickers", r#"["AAPL"]"#.to_string()).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("favoriteTickers").unwrap(), Some(r#"["AAPL"]"#.to_string()));
    }

    #[test]
    fn test_file_store_recovers_from_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ this is not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get("favoriteTickers").unwrap(), None);

        store.set("favoriteTickers", "[]".to_string()).unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("favoriteTickers").unwrap(), Some("[]".to_string()));
    }
}
