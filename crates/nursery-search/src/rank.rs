//! Composite relevance scoring.
//!
//! The text score is the weighted sum of fuzzy scores over title, id,
//! aliases and tags. Only items with a positive text score are ranked; type,
//! popularity and freshness boosts are added on top and never qualify an
//! item by themselves.
use chrono::{DateTime, Duration, Utc};
use nursery_core::types::{EntityDetails, SearchableItem, TaskDue};

use crate::fuzzy::fuzzy_score;

const TITLE_WEIGHT: f64 = 2.0;
const TAG_WEIGHT: f64 = 0.5;
const POPULARITY_WEIGHT: f64 = 0.5;
const OVERDUE_TASK_BOOST: f64 = 2.0;
const TODAY_TASK_BOOST: f64 = 1.0;
const ACTIVE_BATCH_BOOST: f64 = 1.0;
const FRESHNESS_BOOST: f64 = 0.5;
const FRESHNESS_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub score: f64,
    pub item: SearchableItem,
}

#[derive(Debug, Clone)]
pub struct Ranker {
    now: DateTime<Utc>,
}

impl Default for Ranker {
    fn default() -> Self { Self::new() }
}

impl Ranker {
    pub fn new() -> Self { Self::at(Utc::now()) }

    /// Ranker evaluating freshness relative to `now`.
    pub fn at(now: DateTime<Utc>) -> Self { Self { now } }

    /// Composite score, or `None` when no field matches the query at all.
    pub fn score(&self, item: &SearchableItem, query: &str) -> Option<f64> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let text = text_score(item, query);
        if text <= 0.0 {
            return None;
        }
        Some(text + type_boost(item) + POPULARITY_WEIGHT * item.popularity + self.freshness_boost(item))
    }

    /// Matching items, best first. Ties keep corpus order.
    pub fn rank(&self, items: &[SearchableItem], query: &str) -> Vec<ScoredItem> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let mut scored: Vec<ScoredItem> = items
            .iter()
            .filter_map(|item| self.score(item, query).map(|score| ScoredItem { score, item: item.clone() }))
            .collect();
        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    fn freshness_boost(&self, item: &SearchableItem) -> f64 {
        match item.dates.created {
            Some(created) if self.now.signed_duration_since(created) <= Duration::days(FRESHNESS_WINDOW_DAYS) => FRESHNESS_BOOST,
            _ => 0.0,
        }
    }
}

fn text_score(item: &SearchableItem, query: &str) -> f64 {
    let title = TITLE_WEIGHT * fuzzy_score(query, &item.title);
    let id = fuzzy_score(query, &item.id);
    let aliases: f64 = item.aliases.iter().map(|a| fuzzy_score(query, a)).sum();
    let tags: f64 = item.tags.iter().map(|t| fuzzy_score(query, t)).sum();
    title + id + aliases + TAG_WEIGHT * tags
}

fn type_boost(item: &SearchableItem) -> f64 {
    match &item.details {
        EntityDetails::Task { due: TaskDue::Overdue, .. } => OVERDUE_TASK_BOOST,
        EntityDetails::Task { due: TaskDue::Today, .. } => TODAY_TASK_BOOST,
        EntityDetails::Batch { stage, .. } => {
            let active = stage.eq_ignore_ascii_case("active")
                || item.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("active"));
            if active { ACTIVE_BATCH_BOOST } else { 0.0 }
        }
        _ => 0.0,
    }
}
