//! Data models for the TourAI application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Resolved destination with coordinates
//! - Weather: Current conditions at a destination
//! - Attraction: Points of interest near a destination
//! - Response: The merged answer to one query

pub mod attraction;
pub mod location;
pub mod response;
pub mod weather;

// Re-export all public types for convenient access
pub use attraction::{Attraction, MAX_ATTRACTIONS};
pub use location::Location;
pub use response::{Response, ResponseError, Section};
pub use weather::WeatherReport;
