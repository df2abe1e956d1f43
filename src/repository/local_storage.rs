//! Local Storage
//!
//! A persistent string-to-string map kept in a single JSON file. Every call
//! reads the whole file and every write replaces it.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::{DomainError, DomainResult};

pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> DomainResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn load(&self) -> DomainResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| DomainError::Internal(format!("Failed to read {}: {}", self.path.display(), e)))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Write to a sibling temp file, then rename over the original
    fn save(&self, entries: &BTreeMap<String, String>) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| DomainError::Internal(e.to_string()))?;
            }
        }

        let raw = serde_json::to_string(entries).map_err(|e| DomainError::Internal(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)
            .map_err(|e| DomainError::Internal(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("local_storage.json"));
        assert_eq!(storage.get_item("anything").unwrap(), None);
    }

    #[test]
    fn test_set_get_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested").join("local_storage.json"));

        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.set_item("a", "3").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("3"));
        assert_eq!(storage.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        LocalStorage::new(path.clone()).set_item("key", "value").unwrap();

        let reopened = LocalStorage::new(path);
        assert_eq!(reopened.get_item("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = LocalStorage::new(path);
        assert!(matches!(storage.get_item("key"), Err(DomainError::Internal(_))));
    }
}
