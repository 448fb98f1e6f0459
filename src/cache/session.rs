//! Typed JSON view over a [`SessionStore`].

use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::store::{MemoryStore, SessionStore};

const SOURCE: &str = "vetrina::cache";

/// Serializes values in and out of the session store.
///
/// Every failure mode — storage error, malformed or shape-mismatched entry —
/// reads as a cache miss, so callers always fall through to the network
/// path. Writes are best-effort.
#[derive(Clone)]
pub struct SessionCache {
    store: Arc<dyn SessionStore>,
}

impl SessionCache {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Cache backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(
                    target = SOURCE,
                    key,
                    error = %error,
                    "session store read failed; treating as miss"
                );
                counter!("vetrina_cache_miss_total").increment(1);
                return None;
            }
        };

        let Some(raw) = raw else {
            counter!("vetrina_cache_miss_total").increment(1);
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                counter!("vetrina_cache_hit_total").increment(1);
                Some(value)
            }
            Err(error) => {
                // Unversioned keyspace: a shape change shows up here.
                debug!(
                    target = SOURCE,
                    key,
                    error = %error,
                    "cached entry no longer decodes; treating as miss"
                );
                counter!("vetrina_cache_miss_total").increment(1);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(
                    target = SOURCE,
                    key,
                    error = %error,
                    "value could not be serialized for caching"
                );
                return;
            }
        };

        if let Err(error) = self.store.set(key, raw) {
            warn!(
                target = SOURCE,
                key,
                error = %error,
                "session store write failed; entry dropped"
            );
        }
    }
}
