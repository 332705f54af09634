//! Location model for resolved destinations

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

/// A fully resolved destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Short name (city, region, landmark)
    pub name: String,
    /// Full name as reported by the geocoder, e.g. "Roma, Lazio, Italia"
    pub display_name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Great-circle distance to a point in kilometers
    #[must_use]
    pub fn distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude,
            longitude,
        };
        distance(from, to, Units::Kilometers)
    }
}
