//! Preference store — JSON-file-backed key/value map.
//!
//! DESIGN
//! ======
//! Behaves like browser local storage: string keys, JSON values, whole-map
//! writes. The map is held in memory behind a mutex; every write rewrites the
//! backing file (temp file + rename) while the lock is held so the file never
//! lags behind a later write.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: a missing file is an empty store, and a corrupt file is
//! logged and treated as empty. Writes update memory first, then return any
//! persistence error to the caller. Memory stays authoritative for the life
//! of the process even if the disk write failed.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("failed to encode preference {key}: {source}")]
    Encode { key: String, source: serde_json::Error },
    #[error("failed to encode preferences file: {0}")]
    EncodeFile(serde_json::Error),
    #[error("failed to write preferences to {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone)]
pub struct PrefStore {
    inner: Arc<Mutex<Map<String, Value>>>,
    path: Option<PathBuf>,
}

impl PrefStore {
    /// Load the store from `path`. Missing or unreadable files yield an empty store.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = load_map(&path);
        debug!(path = %path.display(), keys = map.len(), "preferences loaded");
        Self { inner: Arc::new(Mutex::new(map)), path: Some(path) }
    }

    /// A store with no backing file.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { inner: Arc::new(Mutex::new(Map::new())), path: None }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Stored value for `key`, or `default` if absent or of the wrong shape.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let map = self.lock();
        map.get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(default)
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Store `value` under `key` and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded (nothing changes) or
    /// the file write fails (memory is already updated).
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PrefsError> {
        let encoded = serde_json::to_value(value)
            .map_err(|source| PrefsError::Encode { key: key.to_owned(), source })?;
        let mut map = self.lock();
        map.insert(key.to_owned(), encoded);
        self.persist(&map)
    }

    /// Read-modify-write under one lock. Returns the stored value.
    ///
    /// # Errors
    ///
    /// Same as [`PrefStore::set`].
    pub fn update<T, F>(&self, key: &str, default: T, f: F) -> Result<T, PrefsError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T,
    {
        let mut map = self.lock();
        let current = map
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(default);
        let next = f(current);
        let encoded = serde_json::to_value(&next)
            .map_err(|source| PrefsError::Encode { key: key.to_owned(), source })?;
        map.insert(key.to_owned(), encoded);
        self.persist(&map)?;
        Ok(next)
    }

    /// Remove `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file write fails.
    pub fn remove(&self, key: &str) -> Result<(), PrefsError> {
        let mut map = self.lock();
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&map)
    }

    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn persist(&self, map: &Map<String, Value>) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(map).map_err(PrefsError::EncodeFile)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .and_then(|()| std::fs::rename(&tmp, path))
            .map_err(|source| PrefsError::Write { path: path.clone(), source })
    }
}

fn load_map(path: &Path) -> Map<String, Value> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "preferences unreadable; starting empty");
            return Map::new();
        }
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!(path = %path.display(), "preferences file is not a JSON object; starting empty");
            Map::new()
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "preferences file malformed; starting empty");
            Map::new()
        }
    }
}

#[cfg(test)]
#[path = "prefs_test.rs"]
mod tests;
