//! Ordering strategies for the result view.
//!
//! A closed set of total orders over places. Only two orders exist and both
//! are known at design time, so this is a tagged union rather than a trait
//! object. Ties always break on the identifier, which guarantees that no two
//! distinct places ever compare equal.

use catalogue::{Coordinates, Place};
use std::cmp::Ordering;

/// Total order applied to the filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingStrategy {
    /// Case-insensitive by title, identifier tiebreak.
    Alphabetic,
    /// By current distance from the reference position, ascending, identifier
    /// tiebreak. The strategy reads `Place::distance_m` as-is; recomputing it
    /// when the reference moves is the caller's job (`geo::update_distances`).
    ShortestDistance,
}

impl OrderingStrategy {
    /// Pick the strategy the original application picks: distance ordering
    /// when a reference position is available, alphabetic otherwise.
    pub fn for_reference(reference: Option<Coordinates>) -> Self {
        match reference {
            Some(_) => OrderingStrategy::ShortestDistance,
            None => OrderingStrategy::Alphabetic,
        }
    }

    /// Compare two places under this strategy. Total and transitive;
    /// `Ordering::Equal` only for equal identifiers.
    pub fn compare(&self, a: &Place, b: &Place) -> Ordering {
        let primary = match self {
            OrderingStrategy::Alphabetic => {
                a.title.to_lowercase().cmp(&b.title.to_lowercase())
            }
            OrderingStrategy::ShortestDistance => a.distance_m.total_cmp(&b.distance_m),
        };
        primary.then_with(|| a.id().cmp(b.id()))
    }
}
