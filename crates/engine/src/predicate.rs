//! The composite predicate deciding which places survive a query.
//!
//! [`matches`] is the AND of three independent clauses, each public on its own
//! so the text, tag, and distance rules can be unit-tested in isolation. All
//! of them are pure functions of their inputs.

use crate::query::Query;
use crate::tags::TagState;
use catalogue::Place;

/// Does `place` pass every clause of `query`?
pub fn matches(place: &Place, query: &Query) -> bool {
    matches_text(place, query.text())
        && matches_tags(place, query.tags())
        && matches_distance(place, query.max_distance_m())
}

/// Empty text matches everything; otherwise a case-insensitive substring
/// match against the title.
pub fn matches_text(place: &Place, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    place.title.to_lowercase().contains(&text.to_lowercase())
}

/// Every active tag must be backed by a `true` flag on the place. Tags with no
/// backing flag are skipped, so a stale or unsupported tag never hides all
/// results.
pub fn matches_tags(place: &Place, tags: &TagState) -> bool {
    tags.active_tags()
        .into_iter()
        .all(|tag| tag.flag(place).unwrap_or(true))
}

/// Inclusive cutoff: a place at exactly the maximum distance passes.
pub fn matches_distance(place: &Place, max_distance_m: f64) -> bool {
    place.distance_m <= max_distance_m
}
