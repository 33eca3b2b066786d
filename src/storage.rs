//! Small persistent key-value store: one JSON object of string values in a
//! file under the data directory.
//!
//! Every call goes to disk, so several handles on the same file (favorites
//! and theme each keep one) never overwrite each other's keys.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const STORE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store file inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries. A missing file is empty; an unreadable or corrupt one is
    /// logged and treated as empty.
    fn entries(&self) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!("cannot read {}: {e}", self.path.display());
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("ignoring corrupt store {}: {e}", self.path.display());
                BTreeMap::new()
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries().remove(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    /// Returns whether the key was present.
    #[cfg(test)]
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries();
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let kv = KeyValueStore::in_dir(dir.path());
        assert_eq!(kv.get("theme"), None);
    }

    #[test]
    fn set_get_remove() {
        let dir = tempdir().unwrap();
        let kv = KeyValueStore::in_dir(&dir.path().join("nested"));

        kv.set("theme", "dark").unwrap();
        assert_eq!(kv.get("theme").as_deref(), Some("dark"));

        assert!(kv.remove("theme").unwrap());
        assert!(!kv.remove("theme").unwrap());
        assert_eq!(kv.get("theme"), None);
    }

    #[test]
    fn handles_on_one_file_share_entries() {
        let dir = tempdir().unwrap();
        let a = KeyValueStore::in_dir(dir.path());
        let b = KeyValueStore::in_dir(dir.path());

        a.set("theme", "light").unwrap();
        b.set("favorites", "[]").unwrap();

        assert_eq!(a.get("favorites").as_deref(), Some("[]"));
        assert_eq!(b.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn corrupt_file_is_treated_as_empty_and_overwritten() {
        let dir = tempdir().unwrap();
        let kv = KeyValueStore::in_dir(dir.path());
        fs::write(kv.path(), "{ not json").unwrap();

        assert_eq!(kv.get("theme"), None);
        kv.set("theme", "dark").unwrap();
        assert_eq!(kv.get("theme").as_deref(), Some("dark"));
    }
}
