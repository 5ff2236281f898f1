use crate::error::Result;
use crate::types::{SearchFilters, SearchableItem, SuggestionGroup};

/// Query surface over one immutable corpus snapshot.
pub trait SearchEngine {
    fn corpus(&self) -> &[SearchableItem];
    fn search(&self, query: &str, filters: Option<&SearchFilters>) -> Vec<SearchableItem>;
    fn suggest(&self, query: &str, limit: usize) -> Vec<SuggestionGroup>;
}

/// Named string slots in a persistence backend outside process memory.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
