//! The query value driving each re-filter.
//!
//! A [`Query`] bundles everything one filtering pass depends on: search text,
//! distance cutoff, tag activation snapshot, ordering strategy, and the
//! optional reference position. Queries are values: once built they are never
//! mutated. Re-filtering means building a new Query and calling
//! `SortedResultSet::apply` again.

use crate::ordering::OrderingStrategy;
use crate::tags::TagState;
use catalogue::Coordinates;

/// Immutable input bundle for one filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    max_distance_m: f64,
    tags: TagState,
    ordering: OrderingStrategy,
    reference: Option<Coordinates>,
}

impl Query {
    /// Sentinel for "no distance cutoff". Every finite distance passes.
    pub const UNBOUNDED: f64 = f64::INFINITY;

    /// An empty query: matches everything, no cutoff, no active tags.
    pub fn new(ordering: OrderingStrategy) -> Self {
        Self {
            text: String::new(),
            max_distance_m: Self::UNBOUNDED,
            tags: TagState::new(),
            ordering,
            reference: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Distance cutoff in meters. Pass [`Query::UNBOUNDED`] to disable.
    pub fn with_max_distance(mut self, meters: f64) -> Self {
        self.max_distance_m = meters;
        self
    }

    pub fn with_tags(mut self, tags: TagState) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_reference(mut self, reference: Coordinates) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_distance_m(&self) -> f64 {
        self.max_distance_m
    }

    pub fn tags(&self) -> &TagState {
        &self.tags
    }

    pub fn ordering(&self) -> OrderingStrategy {
        self.ordering
    }

    pub fn reference(&self) -> Option<Coordinates> {
        self.reference
    }
}
