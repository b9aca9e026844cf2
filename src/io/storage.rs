// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Durable key-value storage for the serialized hotspot list.
//!
//! Each key names one slot whose content is fully replaced on every write.

use crate::error::StorageError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Storage port: get and overwrite string slots by key.
pub trait Storage {
    /// Read a slot. Returns `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Replace the slot's content.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects any single value larger than `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            slots: Rc::default(),
            quota: Some(limit),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    limit,
                });
            }
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per slot under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage under the platform data directory.
    pub fn from_default_dir() -> Result<Self, StorageError> {
        let root = dirs::data_dir()
            .ok_or(StorageError::NoDataDirectory)?
            .join("hotspots");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key != "."
            && !key.contains("..")
            && !key.contains(['/', '\\']);
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.root)?;

        // Rename over the target so readers never see a half-written slot
        let tmp = path.with_extension("json.tmp");
        let result = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_get_missing_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("hotspots").unwrap().is_none());
    }

    #[test]
    fn test_memory_set_overwrites_and_clones_share() {
        let storage = MemoryStorage::new();
        let view = storage.clone();

        storage.set("hotspots", "[1]").unwrap();
        storage.set("hotspots", "[2]").unwrap();

        assert_eq!(view.get("hotspots").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_memory_quota_rejects_large_value() {
        let storage = MemoryStorage::with_quota(4);
        storage.set("k", "[]").unwrap();

        let err = storage.set("k", "[1,2,3]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { size: 7, limit: 4, .. }));
        // Previous content survives the failed write
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_roundtrip_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_root(dir.path().join("nested"));

        assert!(storage.get("hotspots").unwrap().is_none());
        storage.set("hotspots", r#"[{"a":1}]"#).unwrap();
        storage.set("hotspots", "[]").unwrap();

        assert_eq!(storage.get("hotspots").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/hotspots.json").exists());
        assert!(!dir.path().join("nested/hotspots.json.tmp").exists());
    }

    #[test]
    fn test_file_failed_rename_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_root(dir.path());
        // A directory in the slot's place makes the rename fail
        std::fs::create_dir(dir.path().join("hotspots.json")).unwrap();

        assert!(matches!(storage.set("hotspots", "[]"), Err(StorageError::Io(_))));
        assert!(!dir.path().join("hotspots.json.tmp").exists());
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_root(dir.path());

        for key in ["", "../escape", "a/b", "a\\b", "."] {
            assert!(
                matches!(storage.set(key, "[]"), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
