//! Session store: the raw key→JSON-string capability behind the cache.
//!
//! Modeled as an injected trait rather than ambient global state so call
//! sites depend on an abstraction and tests can substitute fakes, including
//! a store that always fails (quota exceeded, storage disabled).

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage rejected the write: {0}")]
    Write(String),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// Tab-scoped flat string store.
///
/// Access is synchronous: implementations must not suspend. Last writer
/// wins on key collisions; entries live until the session ends.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory session store, the default backing for one browsing session.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(rw_read(&self.entries, SOURCE, "get").get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        rw_write(&self.entries, SOURCE, "set").insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        rw_write(&self.entries, SOURCE, "remove").remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        rw_write(&self.entries, SOURCE, "clear").clear();
        Ok(())
    }
}
