//! Loading a catalogue snapshot from a JSON file.
//!
//! The file is a JSON array of place records. Records are decoded into a raw
//! shape first and then funneled through `Place::new`, so the id contract is
//! enforced in one spot regardless of where the data came from.

use crate::error::{CatalogueError, Result};
use crate::geo::Coordinates;
use crate::types::Place;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw on-disk shape of a catalogue entry.
#[derive(Debug, Deserialize)]
struct PlaceRecord {
    id: String,
    title: String,
    category: String,
    #[serde(default)]
    wheelchair_accessible: bool,
    #[serde(default)]
    child_friendly: bool,
    #[serde(default)]
    cheap_entry: bool,
    #[serde(default)]
    free_entry: bool,
    latitude: f64,
    longitude: f64,
}

impl PlaceRecord {
    fn into_place(self) -> Result<Place> {
        let mut place = Place::new(
            self.id,
            self.title,
            self.category,
            Coordinates::new(self.latitude, self.longitude),
        )?;
        place.wheelchair_accessible = self.wheelchair_accessible;
        place.child_friendly = self.child_friendly;
        place.cheap_entry = self.cheap_entry;
        place.free_entry = self.free_entry;
        Ok(place)
    }
}

/// Load all places from a catalogue JSON file.
pub fn load_places(path: &Path) -> Result<Vec<Place>> {
    let file = File::open(path)?;
    let records: Vec<PlaceRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CatalogueError::ParseError {
                file: path.display().to_string(),
                source,
            }
        })?;

    records.into_iter().map(PlaceRecord::into_place).collect()
}
