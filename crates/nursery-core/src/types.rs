//! Domain types shared by the index builder, the ranker and the host.
//!
//! Every record the engine can find is projected into a [`SearchableItem`].
//! The entity kind is carried by [`EntityDetails`], so an item can never have
//! zero or two types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Popularity assigned when a record has no better signal.
pub const DEFAULT_POPULARITY: f64 = 1.0;

/// The closed set of record kinds the engine indexes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Species,
    Batch,
    Task,
    Location,
    Person,
    Order,
    Quote,
    Invoice,
    Client,
}

impl EntityType {
    pub const ALL: [EntityType; 9] = [
        EntityType::Species,
        EntityType::Batch,
        EntityType::Task,
        EntityType::Location,
        EntityType::Person,
        EntityType::Order,
        EntityType::Quote,
        EntityType::Invoice,
        EntityType::Client,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Species => "species",
            EntityType::Batch => "batch",
            EntityType::Task => "task",
            EntityType::Location => "location",
            EntityType::Person => "person",
            EntityType::Order => "order",
            EntityType::Quote => "quote",
            EntityType::Invoice => "invoice",
            EntityType::Client => "client",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| Error::UnknownEntityType(s.to_string()))
    }
}

/// When a task falls due relative to today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskDue {
    Overdue,
    Today,
    Upcoming,
    Done,
}

impl TaskDue {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskDue::Overdue => "overdue",
            TaskDue::Today => "today",
            TaskDue::Upcoming => "upcoming",
            TaskDue::Done => "done",
        }
    }

    /// Urgency weight used as the task's popularity.
    pub fn urgency(self) -> f64 {
        match self {
            TaskDue::Overdue => 3.0,
            TaskDue::Today => 2.0,
            TaskDue::Upcoming | TaskDue::Done => 1.0,
        }
    }
}

/// Entity-specific attributes. Consumers read these contextually; the
/// ranker only looks at the variant itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "metadata", rename_all = "lowercase")]
pub enum EntityDetails {
    Species {
        batch_count: usize,
        total_quantity: u64,
        sites: Vec<String>,
    },
    Batch {
        species: String,
        stage: String,
        location: String,
        quantity: u32,
    },
    Task {
        due: TaskDue,
        priority: String,
        assignee: Option<String>,
        batch_id: Option<String>,
    },
    Location {
        kind: String,
        capacity: Option<u32>,
        active: bool,
    },
    Person {
        role: String,
        email: Option<String>,
    },
    Order {
        client: String,
        total: f64,
        line_items: u32,
    },
    Quote {
        client: String,
        total: f64,
        valid_until: Option<chrono::NaiveDate>,
    },
    Invoice {
        client: String,
        order_id: Option<String>,
        total: f64,
        due_date: Option<chrono::NaiveDate>,
    },
    Client {
        contact: Option<String>,
        email: Option<String>,
        segment: String,
    },
}

impl EntityDetails {
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityDetails::Species { .. } => EntityType::Species,
            EntityDetails::Batch { .. } => EntityType::Batch,
            EntityDetails::Task { .. } => EntityType::Task,
            EntityDetails::Location { .. } => EntityType::Location,
            EntityDetails::Person { .. } => EntityType::Person,
            EntityDetails::Order { .. } => EntityType::Order,
            EntityDetails::Quote { .. } => EntityType::Quote,
            EntityDetails::Invoice { .. } => EntityType::Invoice,
            EntityDetails::Client { .. } => EntityType::Client,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDates {
    pub created: Option<DateTime<Utc>>,
}

/// One record of the unified search corpus.
///
/// - `id`: unique within the item's type, not across types
/// - `title`: primary display string and the heaviest-weighted match field
/// - `aliases`: secondary strings eligible for matching
/// - `description`: shown with results, never scored
/// - `tags`: short labels matched at reduced weight
/// - `site`/`status`: structured attributes for filtering
/// - `popularity`: corpus-intrinsic importance, clamped to zero or more by
///   the builder and on deserialization (direct assignment is unchecked)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchableItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub site: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub details: EntityDetails,
    #[serde(default)]
    pub dates: ItemDates,
    #[serde(deserialize_with = "deserialize_popularity")]
    pub popularity: f64,
}

fn clamp_popularity(popularity: f64) -> f64 {
    if popularity.is_nan() { 0.0 } else { popularity.max(0.0) }
}

fn deserialize_popularity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_popularity)
}

impl SearchableItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, details: EntityDetails) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            aliases: Vec::new(),
            description: String::new(),
            tags: Vec::new(),
            site: None,
            status: None,
            details,
            dates: ItemDates::default(),
            popularity: DEFAULT_POPULARITY,
        }
    }

    pub fn entity_type(&self) -> EntityType { self.details.entity_type() }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Empty labels are dropped.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).filter(|t: &String| !t.is_empty()).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_site(mut self, site: Option<impl Into<String>>) -> Self {
        self.site = site.map(Into::into);
        self
    }

    pub fn with_status(mut self, status: Option<impl Into<String>>) -> Self {
        self.status = status.map(Into::into);
        self
    }

    pub fn with_created(mut self, created: Option<DateTime<Utc>>) -> Self {
        self.dates.created = created;
        self
    }

    /// Negative and NaN popularity collapse to zero.
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = clamp_popularity(popularity);
        self
    }
}

/// Structured predicate narrowing the corpus. An empty list means the
/// predicate is absent and always passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    #[serde(default)]
    pub types: Vec<EntityType>,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub sites: Vec<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.status.is_empty() && self.sites.is_empty()
    }
}

/// Ranked results of one entity type, capped for preview display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuggestionGroup {
    pub entity_type: EntityType,
    pub items: Vec<SearchableItem>,
}
