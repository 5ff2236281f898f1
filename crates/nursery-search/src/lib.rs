//! nursery-search
//!
//! In-memory search over the nursery corpus: the index builder projects raw
//! records into `SearchableItem`s, the ranker scores them against a query,
//! and the session facade wires filtering, ranking and suggestion grouping.
pub mod builder;
pub mod filter;
pub mod fuzzy;
pub mod group;
pub mod rank;
pub mod session;

pub use builder::IndexBuilder;
pub use filter::apply_filters;
pub use fuzzy::fuzzy_score;
pub use group::group_by_type;
pub use rank::{Ranker, ScoredItem};
pub use session::{get_suggestions, search_index, SearchSession};
