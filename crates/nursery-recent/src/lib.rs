//! Recently submitted search queries, persisted through a key-value backend.
//!
//! Reads never fail: a missing, unreadable or malformed entry is an empty
//! history. Writes that fail are logged and dropped.
pub mod recent;
pub mod store;

pub use recent::{RecentSearches, DEFAULT_CAPACITY, DEFAULT_KEY};
pub use store::{JsonFileStore, MemoryStore};
