//! Core domain types for the place catalogue.
//!
//! This module defines the fundamental data structures used throughout the system.

use crate::error::{CatalogueError, Result};
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique, stable identifier for a place. Survives catalogue refreshes, so the
/// result-set engine can track the same entry across snapshots.
pub type PlaceId = String;

/// Distance value used when no reference position exists yet; filters treat it
/// like any other distance, so callers should recompute before distance queries.
pub const DISTANCE_UNKNOWN: f64 = f64::MAX;

// =============================================================================
// Place
// =============================================================================

/// A single catalogue entry: a point of interest with its filterable attributes.
///
/// Identity is the `id` alone. Whether two snapshots of the same place render
/// identically is a separate question, answered by [`Place::same_content`]
/// (title + category), so a consumer can tell "re-render this row" apart from
/// "this row moved".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    id: PlaceId,
    pub title: String,
    /// Category label, e.g. "Castle" or "Museum".
    pub category: String,
    pub wheelchair_accessible: bool,
    pub child_friendly: bool,
    pub cheap_entry: bool,
    pub free_entry: bool,
    /// Liked state is stamped on by the caller from its liked-id set, see
    /// `SearchSettings::apply_liked`. Not part of the catalogue file.
    #[serde(default)]
    pub liked: bool,
    pub coordinates: Coordinates,
    /// Meters from the current reference position. Mutable: recomputed by
    /// `geo::update_distances` whenever the reference moves.
    #[serde(default = "distance_unknown")]
    pub distance_m: f64,
}

fn distance_unknown() -> f64 {
    DISTANCE_UNKNOWN
}

impl Place {
    /// Create a place, rejecting an empty identifier.
    ///
    /// A place without an id cannot be tracked across snapshots, so the
    /// contract violation is caught here rather than deep inside the diff
    /// engine.
    pub fn new(
        id: impl Into<PlaceId>,
        title: impl Into<String>,
        category: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CatalogueError::MissingId);
        }
        Ok(Self {
            id,
            title: title.into(),
            category: category.into(),
            wheelchair_accessible: false,
            child_friendly: false,
            cheap_entry: false,
            free_entry: false,
            liked: false,
            coordinates,
            distance_m: DISTANCE_UNKNOWN,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Content sameness: title and category, the fields a list row renders.
    /// Distance and flag changes do not count as content changes.
    pub fn same_content(&self, other: &Place) -> bool {
        self.title == other.title && self.category == other.category
    }
}
