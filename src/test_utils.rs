use crate::db::store::{MemoryStore, Store};
use crate::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Memory store that counts mutating calls
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Store for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key)
    }

    fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), Error> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_many(entries)
    }
}
