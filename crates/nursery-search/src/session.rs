use std::sync::Arc;

use nursery_core::config::IndexConfig;
use nursery_core::sources::SourceCollections;
use nursery_core::traits::SearchEngine;
use nursery_core::types::{SearchFilters, SearchableItem, SuggestionGroup};
use tracing::debug;

use crate::builder::IndexBuilder;
use crate::filter::apply_filters;
use crate::group::group_by_type;
use crate::rank::Ranker;

/// Filter then rank `corpus` against `query`.
///
/// With a blank query the ranker is bypassed: the filtered corpus comes back
/// in corpus order, or the corpus itself when no filter is present.
pub fn search_index(corpus: &[SearchableItem], query: &str, filters: Option<&SearchFilters>) -> Vec<SearchableItem> {
    search_with(&Ranker::new(), corpus, query, filters)
}

/// Ranked matches for `query`, bucketed by entity type with at most `limit`
/// items per bucket. A blank query has no suggestions.
pub fn get_suggestions(corpus: &[SearchableItem], query: &str, limit: usize) -> Vec<SuggestionGroup> {
    suggest_with(&Ranker::new(), corpus, query, limit)
}

fn search_with(ranker: &Ranker, corpus: &[SearchableItem], query: &str, filters: Option<&SearchFilters>) -> Vec<SearchableItem> {
    let filtered;
    let working: &[SearchableItem] = match filters {
        Some(filters) if !filters.is_empty() => {
            filtered = apply_filters(corpus, filters);
            &filtered
        }
        _ => corpus,
    };
    if query.trim().is_empty() {
        return working.to_vec();
    }
    let ranked = ranker.rank(working, query);
    debug!(query, candidates = working.len(), hits = ranked.len(), "search");
    ranked.into_iter().map(|s| s.item).collect()
}

fn suggest_with(ranker: &Ranker, corpus: &[SearchableItem], query: &str, limit: usize) -> Vec<SuggestionGroup> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    group_by_type(search_with(ranker, corpus, query, None), limit)
}

/// One immutable corpus snapshot plus the ranker used against it.
#[derive(Clone)]
pub struct SearchSession {
    corpus: Arc<[SearchableItem]>,
    ranker: Ranker,
}

impl SearchSession {
    pub fn new(corpus: Vec<SearchableItem>) -> Self {
        Self { corpus: corpus.into(), ranker: Ranker::new() }
    }

    pub fn build(sources: &SourceCollections, config: &IndexConfig) -> Self {
        let builder = match &config.entity_types {
            Some(types) => IndexBuilder::with_types(types.iter().copied()),
            None => IndexBuilder::new(),
        };
        Self::new(builder.build(sources))
    }

    /// Replace the ranker, e.g. to pin the freshness clock.
    pub fn with_ranker(mut self, ranker: Ranker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn len(&self) -> usize { self.corpus.len() }

    pub fn is_empty(&self) -> bool { self.corpus.is_empty() }

    pub fn search_index(&self, query: &str, filters: Option<&SearchFilters>) -> Vec<SearchableItem> {
        search_with(&self.ranker, &self.corpus, query, filters)
    }

    pub fn get_suggestions(&self, query: &str, limit: usize) -> Vec<SuggestionGroup> {
        suggest_with(&self.ranker, &self.corpus, query, limit)
    }
}

impl SearchEngine for SearchSession {
    fn corpus(&self) -> &[SearchableItem] { &self.corpus }

    fn search(&self, query: &str, filters: Option<&SearchFilters>) -> Vec<SearchableItem> {
        self.search_index(query, filters)
    }

    fn suggest(&self, query: &str, limit: usize) -> Vec<SuggestionGroup> {
        self.get_suggestions(query, limit)
    }
}
