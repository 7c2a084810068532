//! On-disk key-value store backing session and preference state.
//!
//! Plays the role the browser's local storage plays for the web shell:
//! string keys, string values, synchronous reads, write-through
//! persistence. The whole map lives in one JSON document that is rewritten
//! atomically (temp file + rename) on every mutation; concurrent writers
//! serialize on the map lock and the last write wins.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::errors::StoreError;

const STORE_FILE: &str = "store.json";
const TMP_FILE_SUFFIX: &str = "tmp";

/// Persisted key-value state shared by the session and preference managers.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl LocalStore {
    /// Opens the store under `dir`, creating the directory and starting
    /// empty when no document exists yet.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(LocalStore {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Current value under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores `value` under `key` and persists immediately.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let snapshot = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(key.to_string(), value.to_string());
            entries.clone()
        };
        self.persist(&snapshot)
    }

    /// Drops `key` and persists immediately. Removing an absent key is a
    /// no-op that still succeeds.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let snapshot = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.remove(key);
            entries.clone()
        };
        self.persist(&snapshot)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, json: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension(TMP_FILE_SUFFIX)
}
