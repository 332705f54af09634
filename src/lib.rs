//! `TourAI` - Multi-agent tourism assistant
//!
//! This library provides the core functionality for understanding tourism
//! queries and answering them with live weather data and attraction
//! recommendations from free, keyless public APIs.

pub mod agents;
pub mod config;
pub mod error;
pub mod extract;
pub mod intent;
pub mod logging;
pub mod models;
pub mod orchestrator;

// Re-export core types for public API
pub use agents::{Geocoder, PlacesAgent, WeatherAgent};
pub use config::TourAiConfig;
pub use error::TourAiError;
pub use extract::extract_location;
pub use intent::{Intent, classify};
pub use models::{Attraction, Location, Response, ResponseError, Section, WeatherReport};
pub use orchestrator::Orchestrator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
