//! Durable key-value slots.
//!
//! A slot holds one string value addressed by a fixed key. Writes replace the
//! whole slot; readers never observe a partially written value. Every handle to
//! the same backing medium sees the latest completed write, which is what the
//! saved-listings store relies on for cross-surface consistency.
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, trace};

use crate::error::{StorageError, StorageResult};

/// Backing medium for named slots
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot was never written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace a slot's value as one unit.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Clear a slot. Clearing an absent slot is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Read-modify-write a slot. `f` receives the current value and returns
    /// the replacement, or `None` to leave the slot untouched.
    ///
    /// Backends that can hold a lock across the whole operation override this
    /// so no other write lands between the read and the write.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> StorageResult<()> {
        let current = self.read(key)?;
        match f(current.as_deref()) {
            Some(next) => self.write(key, &next),
            None => Ok(()),
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> StorageResult<()> {
        (**self).update(key, f)
    }
}

/// In-process slots. Clones share the same map, so a handle created later
/// observes writes made through any earlier handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let slots = self.slots.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        trace!(key, bytes = value.len(), "memory slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.remove(key);
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> StorageResult<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        if let Some(next) = f(slots.get(key).map(String::as_str)) {
            trace!(key, bytes = next.len(), "memory slot updated");
            slots.insert(key.to_string(), next);
        }
        Ok(())
    }
}

/// One JSON file per slot under a directory: `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file that is then renamed over the slot, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => {
                trace!(path = %path.display(), bytes = value.len(), "slot read");
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = value.len(), "slot persisted");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}
