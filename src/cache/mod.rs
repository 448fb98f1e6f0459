//! Session-scoped cache.
//!
//! A flat key→JSON store memoizing fetched collections and composed
//! per-post bundles for the lifetime of one browsing session. No TTL, no
//! size bound, no eviction — callers own key hygiene, and every storage
//! failure degrades to a cache miss so the network path stays reachable.

mod keys;
mod lock;
mod session;
mod store;

pub use keys::{ALL_POSTS_KEY, bundle_key};
pub use session::SessionCache;
pub use store::{MemoryStore, SessionStore, StoreError};
