use nursery_core::config::RecentConfig;
use nursery_core::traits::KeyValueStore;
use tracing::{debug, warn};

pub const DEFAULT_KEY: &str = "nursery.recent-searches";
pub const DEFAULT_CAPACITY: usize = 10;

/// Most-recent-first list of distinct submitted queries.
///
/// Read-then-write without coordination: two processes saving at once can
/// overwrite each other's entry.
pub struct RecentSearches<S> {
    store: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStore> RecentSearches<S> {
    pub fn new(store: S) -> Self {
        Self { store, key: DEFAULT_KEY.to_string(), capacity: DEFAULT_CAPACITY }
    }

    pub fn from_config(store: S, config: &RecentConfig) -> Self {
        Self { store, key: config.key.clone(), capacity: config.capacity.max(1) }
    }

    pub fn store(&self) -> &S { &self.store }

    /// Stored queries, or an empty list on any storage or parse failure.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                debug!(key = %self.key, "recent searches unavailable: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(mut queries) => {
                queries.truncate(self.capacity);
                queries
            }
            Err(e) => {
                debug!(key = %self.key, "ignoring malformed recent searches: {}", e);
                Vec::new()
            }
        }
    }

    /// Move `query` to the front, drop its older copy, keep `capacity`
    /// entries and write the list back. Blank queries are ignored.
    pub fn save(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let mut queries = self.load();
        queries.retain(|q| q != query);
        queries.insert(0, query.to_string());
        queries.truncate(self.capacity);

        let body = match serde_json::to_string(&queries) {
            Ok(body) => body,
            Err(e) => {
                warn!("could not encode recent searches: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &body) {
            warn!(key = %self.key, "could not persist recent searches: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, "could not clear recent searches: {}", e);
        }
    }
}
