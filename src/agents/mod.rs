//! Child agents
//!
//! Each agent performs one external lookup. The orchestrator only sees the
//! traits below, so agents can be swapped for other providers or test doubles:
//! - Geocoder: place name to coordinates (Nominatim)
//! - WeatherAgent: current conditions (Open-Meteo)
//! - PlacesAgent: nearby attractions (Overpass / OpenStreetMap)

use async_trait::async_trait;

use crate::Result;
use crate::models::{Attraction, Location, WeatherReport};

pub mod geocode;
pub mod http;
pub mod places;
pub mod weather;

pub use geocode::NominatimGeocoder;
pub use places::OverpassPlacesAgent;
pub use weather::OpenMeteoWeatherAgent;

/// Resolves free-text place names
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the place does not exist; `Err` means the lookup failed
    async fn resolve(&self, name: &str) -> Result<Option<Location>>;
}

/// Reports current conditions at a location
#[async_trait]
pub trait WeatherAgent: Send + Sync {
    async fn current_weather(&self, location: &Location) -> Result<WeatherReport>;
}

/// Recommends attractions around a location
#[async_trait]
pub trait PlacesAgent: Send + Sync {
    /// Up to `limit` attractions, best first
    async fn attractions(&self, location: &Location, limit: usize) -> Result<Vec<Attraction>>;
}
