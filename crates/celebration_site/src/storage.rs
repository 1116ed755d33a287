//! # Local Key-Value State
//!
//! The page keeps its state the way a browser's local storage does: string
//! values under string keys, JSON inside. [`read_state`] never fails; a
//! missing or corrupt entry yields the caller's fallback.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{SiteError, SiteResult};

/// String key-value storage.
pub trait KeyValueStore {
    /// Returns the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn get(&self, key: &str) -> SiteResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be written.
    fn set(&mut self, key: &str, value: &str) -> SiteResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store can't be written.
    fn remove(&mut self, key: &str) -> SiteResult<()>;
}

/// In-memory store, for tests and pages without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SiteResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SiteResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SiteResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be created.
    pub fn open(dir: impl Into<PathBuf>) -> SiteResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SiteError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory the store writes to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> SiteResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(SiteError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> SiteResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SiteError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> SiteResult<()> {
        let path = self.path_for(key)?;
        // Written beside the target, then renamed over it.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|source| SiteError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| SiteError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> SiteResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SiteError::Io { path, source }),
        }
    }
}

/// Reads JSON state under `key`, falling back when missing or unreadable.
pub fn read_state<T, S>(store: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(e) => {
            tracing::warn!("unable to read state {key}: {e}");
            return fallback;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("discarding corrupt state {key}: {e}");
            fallback
        }
    }
}

/// Writes `value` as JSON under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn write_state<T, S>(store: &mut S, key: &str, value: &T) -> SiteResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("celebration_store_{tag}_{id}"))
    }

    #[test]
    fn test_missing_and_corrupt_state_fall_back() {
        let mut store = MemoryStore::new();
        assert_eq!(read_state(&store, "absent", vec![1_u32]), vec![1]);

        store.set("broken", "{not json").unwrap();
        assert_eq!(read_state::<Vec<u32>, _>(&store, "broken", Vec::new()), Vec::<u32>::new());
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        write_state(&mut store, "numbers", &[3_u32, 4, 5]).unwrap();
        assert_eq!(read_state(&store, "numbers", Vec::<u32>::new()), vec![3, 4, 5]);

        store.remove("numbers").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = temp_dir("persist");
        {
            let mut store = FileStore::open(&dir).unwrap();
            write_state(&mut store, "stars_v1", &["a", "b"]).unwrap();
        }

        let store = FileStore::open(&dir).unwrap();
        let stars: Vec<String> = read_state(&store, "stars_v1", Vec::new());
        assert_eq!(stars, vec!["a".to_owned(), "b".to_owned()]);
        assert!(store.dir().join("stars_v1.json").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = temp_dir("keys");
        let mut store = FileStore::open(&dir).unwrap();

        for key in ["../escape", "a/b", "", ".hidden"] {
            assert!(matches!(store.set(key, "1"), Err(SiteError::InvalidKey(_))), "{key}");
        }
        assert_eq!(store.get("never_written").unwrap(), None);
        store.remove("never_written").unwrap();

        std::fs::remove_dir_all(&dir).ok();
    }
}
