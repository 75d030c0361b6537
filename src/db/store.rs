use crate::error::Error;
use log::{error, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Flat key-value persistence surface holding raw JSON text per key
pub trait Store: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Overwrite `key` with `value`
    fn set(&self, key: &str, value: String) -> Result<(), Error>;

    /// Delete `key`, succeeding if it was never present
    fn remove(&self, key: &str) -> Result<(), Error>;

    /// Write several keys as one unit.
    ///
    /// The default applies the writes one by one; implementations that can do
    /// better override it.
    fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), Error> {
        for (key, value) in entries {
            self.set(&key, value)?;
        }
        Ok(())
    }

    /// Whether a storage medium is present at all
    fn is_available(&self) -> bool {
        true
    }
}

pub type SharedStore = Arc<dyn Store>;

fn poisoned() -> Error {
    Error::Storage("Store lock poisoned".to_string())
}

/// Volatile store used in tests and as a scratch medium
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), Error> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn set_many(&self, batch: Vec<(String, String)>) -> Result<(), Error> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.extend(batch);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Every key maps to the raw text of its value, so a corrupt value under one
/// key never prevents reading the others. Each mutation rewrites the whole
/// file through a temporary sibling and a rename.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file is missing
    pub fn open(path: &Path) -> Result<Self, Error> {
        let entries = match std::fs::read_to_string(path) {
            Ok(data) if data.trim().is_empty() => BTreeMap::new(),
            Ok(data) => match serde_json::from_str::<BTreeMap<String, String>>(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    error!("Data file {} is corrupt, starting empty: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn mutate<F>(&self, apply: F) -> Result<(), Error>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let mut next = entries.clone();
        apply(&mut next);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&self, batch: Vec<(String, String)>) -> Result<(), Error> {
        self.mutate(|entries| entries.extend(batch))
    }
}

/// Stand-in for an execution context without any storage medium.
///
/// Reads see nothing and writes are dropped.
#[derive(Default)]
pub struct DetachedStore;

impl Store for DetachedStore {
    fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: String) -> Result<(), Error> {
        warn!("No storage medium, dropping write to {}", key);
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), Error> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}
