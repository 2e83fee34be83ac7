//! Reference-position handling: coordinates and distance recomputation.
//!
//! The result-set engine never computes geodesic distance itself; it only reads
//! `Place::distance_m`. This module is the collaborator that keeps that field
//! current: whenever the reference position changes, run [`update_distances`]
//! over the catalogue before re-applying a query.

use crate::types::Place;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, for the haversine formula.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * h.sqrt().asin()
    }
}

/// Recompute `distance_m` for every place against a new reference position.
///
/// Runs in parallel; catalogues are small but this is called on every position
/// update, so it sits on the hot path of a moving user.
pub fn update_distances(places: &mut [Place], reference: Coordinates) {
    places
        .par_iter_mut()
        .for_each(|place| place.distance_m = reference.distance_to(place.coordinates));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_to_self() {
        let here = Coordinates::new(53.801, -1.549);
        assert!(here.distance_to(here) < 1e-6);
    }

    #[test]
    fn test_known_distance() {
        // Leeds city centre to Kirkstall Abbey, roughly 4.4 km.
        let leeds = Coordinates::new(53.8008, -1.5491);
        let kirkstall = Coordinates::new(53.8224, -1.6076);
        let d = leeds.distance_to(kirkstall);
        assert!(d > 4_000.0 && d < 5_000.0, "got {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates::new(53.8, -1.55);
        let b = Coordinates::new(54.0, -1.0);
        assert!((a.distance_to(b) - b.distance_to(a)).abs() < 1e-6);
    }

    #[test]
    fn test_update_distances() {
        let mut places = vec![
            Place::new("a", "Abbey", "Abbey", Coordinates::new(53.8224, -1.6076)).unwrap(),
            Place::new("b", "Bridge", "Bridge", Coordinates::new(53.8008, -1.5491)).unwrap(),
        ];
        let reference = Coordinates::new(53.8008, -1.5491);
        update_distances(&mut places, reference);

        assert!(places[0].distance_m > 4_000.0);
        assert!(places[1].distance_m < 1.0);
    }
}
