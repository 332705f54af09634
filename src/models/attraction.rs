//! Tourist attraction model

use serde::{Deserialize, Serialize};

/// Upper bound on attractions in any response
pub const MAX_ATTRACTIONS: usize = 5;

/// A point of interest near a destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Attraction {
    /// Attraction name
    pub name: String,
    /// Short descriptor, e.g. "Museum" or "Viewpoint"
    pub kind: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Distance from the destination center in kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl Attraction {
    /// Create a new attraction without distance information
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            latitude,
            longitude,
            distance_km: None,
        }
    }

    /// Turn an OpenStreetMap tag value like `"city_gate"` into `"City Gate"`
    #[must_use]
    pub fn format_kind(tag_value: &str) -> String {
        tag_value
            .split(['_', ' '])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
