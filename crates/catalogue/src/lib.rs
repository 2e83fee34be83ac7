//! # Catalogue Crate
//!
//! This crate handles the place catalogue: the domain model for points of
//! interest, loading snapshots from disk, and the caller-side collaborators
//! the search engine depends on (distance recomputation, user settings).
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Place, PlaceId)
//! - **parser**: Load a catalogue snapshot from a JSON file
//! - **geo**: Coordinates, haversine distance, bulk distance updates
//! - **settings**: Caller-owned search preferences (distance unit, liked set)
//! - **error**: Error types for catalogue loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalogue::{load_places, update_distances, Coordinates, SearchSettings};
//! use std::path::Path;
//!
//! let mut places = load_places(Path::new("data/places.json"))?;
//!
//! // Stamp per-user liked state onto the snapshot
//! let settings = SearchSettings::default();
//! settings.apply_liked(&mut places);
//!
//! // Recompute distances for the current position
//! update_distances(&mut places, Coordinates::new(53.8008, -1.5491));
//! ```

// Public modules
pub mod error;
pub mod geo;
pub mod parser;
pub mod settings;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogueError, Result};
pub use geo::{Coordinates, update_distances};
pub use parser::load_places;
pub use settings::{DistanceUnit, SearchSettings};
pub use types::{DISTANCE_UNKNOWN, Place, PlaceId};
