use crate::error::Error;
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error as ThisError;

pub mod mirror;
pub mod models;
pub mod repositories;
pub mod store;

pub use store::{DetachedStore, FileStore, MemoryStore, SharedStore, Store};

/// Keys of the persisted collections
pub mod keys {
    pub const CAMERAS: &str = "cameras";
    pub const LAYOUTS: &str = "layouts";
    pub const RECORDINGS: &str = "recordings";
    pub const EVENTS: &str = "events";
    pub const USERS: &str = "users";
    pub const ACTIVE_USER: &str = "activeUser";
    pub const STORAGE_CONFIG: &str = "storageConfig";
}

/// Failure to turn a stored value back into its collection type
#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("failed to read key {key}: {message}")]
    Read { key: String, message: String },

    #[error("failed to parse key {key}: {message}")]
    Parse { key: String, message: String },
}

/// Typed JSON accessors over a [`Store`].
///
/// Reads never fail: a missing key, an undecodable value or a missing medium
/// all yield the caller's fallback. Writes never fail either; errors are logged.
#[derive(Clone)]
pub struct RecordStore {
    store: SharedStore,
}

impl RecordStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Record store over a fresh in-memory medium
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn is_available(&self) -> bool {
        self.store.is_available()
    }

    /// Raw stored text under `key`, if any
    pub fn raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to read {} from store: {}", key, e);
                None
            }
        }
    }

    /// Decode the value under `key`, reporting why it could not be read
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        let raw = self.store.get(key).map_err(|e| DecodeError::Read {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        match raw {
            None => Ok(None),
            Some(text) if text.is_empty() => Ok(None),
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| DecodeError::Parse {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    /// Decode the value under `key`, or return `fallback`
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                error!("Failed to parse JSON from store: {}", e);
                fallback
            }
        }
    }

    /// Replace the value under `key` in full
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if !self.store.is_available() {
            debug!("No storage medium, skipping write to {}", key);
            return;
        }

        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, text) {
            error!("Failed to write {} to store: {}", key, e);
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            error!("Failed to remove {} from store: {}", key, e);
        }
    }

    /// Apply all writes of `batch` as one unit
    pub fn commit(&self, batch: WriteBatch) -> Result<(), Error> {
        if !self.store.is_available() {
            debug!("No storage medium, skipping batch of {} writes", batch.len());
            return Ok(());
        }
        if batch.is_empty() {
            return Ok(());
        }
        self.store.set_many(batch.entries)
    }
}

/// Serialized writes destined for several keys
#[derive(Debug, Default)]
pub struct WriteBatch {
    entries: Vec<(String, String)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Result<Self, Error> {
        let text = serde_json::to_string(value)?;
        self.entries.push((key.to_string(), text));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
