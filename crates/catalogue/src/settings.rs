//! Caller-owned search preferences.
//!
//! The original application kept these in a process-wide singleton; here they
//! are an explicit value the caller holds and passes into query construction,
//! so the engine stays free of hidden global state.

use crate::types::{Place, PlaceId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unit used for distances the user sees and enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Kilometer,
    Mile,
}

impl DistanceUnit {
    /// Meters per one unit.
    pub fn conversion_rate(&self) -> f64 {
        match self {
            DistanceUnit::Kilometer => 1_000.0,
            DistanceUnit::Mile => 1_609.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometer => "kilometers",
            DistanceUnit::Mile => "miles",
        }
    }

    /// Convert a user-entered distance in this unit to meters.
    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.conversion_rate()
    }
}

impl Default for DistanceUnit {
    fn default() -> Self {
        DistanceUnit::Kilometer
    }
}

/// User preferences that shape searches: distance unit and the liked-place set.
///
/// Liked state lives here rather than in the catalogue, since it is per-user,
/// not per-place. [`SearchSettings::apply_liked`] stamps it onto a fresh
/// snapshot before the snapshot is handed to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSettings {
    pub distance_unit: DistanceUnit,
    liked_places: HashSet<PlaceId>,
}

impl SearchSettings {
    pub fn new(distance_unit: DistanceUnit) -> Self {
        Self {
            distance_unit,
            liked_places: HashSet::new(),
        }
    }

    pub fn like(&mut self, id: impl Into<PlaceId>) {
        self.liked_places.insert(id.into());
    }

    pub fn unlike(&mut self, id: &str) {
        self.liked_places.remove(id);
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked_places.contains(id)
    }

    pub fn liked_places(&self) -> &HashSet<PlaceId> {
        &self.liked_places
    }

    /// Set the `liked` flag on every place from the liked-id set.
    pub fn apply_liked(&self, places: &mut [Place]) {
        for place in places.iter_mut() {
            place.liked = self.liked_places.contains(place.id());
        }
    }
}
