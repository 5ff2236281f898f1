//! Tiered fuzzy matching of a query against one text field.

pub const EXACT: f64 = 6.0;
pub const PREFIX: f64 = 5.0;
pub const WORD_BOUNDARY: f64 = 4.0;
pub const SUBSTRING: f64 = 3.0;
pub const SUBSEQUENCE: f64 = 2.0;

const SUBSEQUENCE_STEP: f64 = 0.5;
const SUBSEQUENCE_THRESHOLD: f64 = 0.3;

/// Score `candidate` against `query`, case-insensitively.
///
/// The first matching tier wins: exact 6, prefix 5, containment right after a
/// space or hyphen 4, containment anywhere 3, in-order subsequence covering
/// enough of the query 2, otherwise 0. An empty query scores 0.
pub fn fuzzy_score(query: &str, candidate: &str) -> f64 {
    let query = query.to_lowercase();
    if query.is_empty() {
        return 0.0;
    }
    let candidate = candidate.to_lowercase();

    if candidate == query {
        return EXACT;
    }
    if candidate.starts_with(&query) {
        return PREFIX;
    }
    if candidate.contains(&format!(" {query}")) || candidate.contains(&format!("-{query}")) {
        return WORD_BOUNDARY;
    }
    if candidate.contains(&query) {
        return SUBSTRING;
    }

    let query_len = query.chars().count();
    if subsequence_score(&query, &candidate) > SUBSEQUENCE_THRESHOLD * query_len as f64 {
        SUBSEQUENCE
    } else {
        0.0
    }
}

/// Greedy left-to-right walk: each query char is looked for strictly after
/// the previous hit. Matching stops when the candidate runs out.
fn subsequence_score(query: &str, candidate: &str) -> f64 {
    let mut wanted = query.chars().peekable();
    let mut score = 0.0;
    for c in candidate.chars() {
        match wanted.peek() {
            Some(&q) if q == c => {
                score += SUBSEQUENCE_STEP;
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    score
}
