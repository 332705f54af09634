//! Aggregated answer to a single tourism query

use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use super::{Attraction, Location, WeatherReport};
use crate::intent::Intent;

/// Outcome of one agent section of a response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    /// The intent did not ask for this section
    Skipped,
    /// The agent answered
    Ready(T),
    /// The agent failed; the rest of the response is still valid
    Unavailable { reason: String },
}

impl<T> Section<T> {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Section::Skipped)
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Section::Unavailable { .. })
    }

    /// Borrow the payload when the agent answered
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Conditions that abort a request before any agent runs
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseError {
    #[error("{}", not_found_message(.candidate.as_deref()))]
    LocationNotFound { candidate: Option<String> },

    #[error("Location lookup is unavailable right now. Please try again later.")]
    GeocoderUnavailable { reason: String },
}

fn not_found_message(candidate: Option<&str>) -> String {
    match candidate {
        Some(name) => {
            format!("I'm sorry, I don't know where '{name}' is. Please check the spelling.")
        }
        None => "I'm sorry, I couldn't recognise a location in your request.".to_string(),
    }
}

/// Everything the assistant knows about one query
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub query: String,
    pub intent: Option<Intent>,
    pub location: Option<Location>,
    pub weather: Section<WeatherReport>,
    pub places: Section<Vec<Attraction>>,
    pub error: Option<ResponseError>,
}

impl Response {
    /// A response that carries only a fatal error
    #[must_use]
    pub fn failed(query: impl Into<String>, error: ResponseError) -> Self {
        Self {
            query: query.into(),
            intent: None,
            location: None,
            weather: Section::Skipped,
            places: Section::Skipped,
            error: Some(error),
        }
    }

    /// True when no fatal error occurred (sections may still be unavailable)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Attractions, or an empty slice when the section is not ready
    #[must_use]
    pub fn attractions(&self) -> &[Attraction] {
        self.places.ready().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(error) = &self.error {
            return writeln!(f, "❌ {error}");
        }

        if let Some(location) = &self.location {
            writeln!(f, "✅ Found: {}", location.display_name)?;
        }

        match &self.weather {
            Section::Skipped => {}
            Section::Ready(weather) => {
                writeln!(f)?;
                writeln!(f, "🌡️ Weather Information")?;
                writeln!(f, "   Temperature: {}", weather.format_temperature())?;
                writeln!(f, "   Conditions:  {}", weather.description)?;
                writeln!(f, "   Rain Chance: {}", weather.format_rain_chance())?;
            }
            Section::Unavailable { .. } => {
                writeln!(f)?;
                writeln!(f, "⚠️ Weather information is unavailable right now.")?;
            }
        }

        match &self.places {
            Section::Skipped => {}
            Section::Ready(places) if places.is_empty() => {
                writeln!(f)?;
                writeln!(
                    f,
                    "🗺️ No specific tourist attractions found, but it's still worth exploring!"
                )?;
            }
            Section::Ready(places) => {
                writeln!(f)?;
                writeln!(f, "🏛️ Top Tourist Attractions")?;
                for (idx, place) in places.iter().enumerate() {
                    write!(f, "   {}. {} - {}", idx + 1, place.name, place.kind)?;
                    if let Some(distance) = place.distance_km {
                        write!(f, " ({distance:.1} km)")?;
                    }
                    writeln!(f)?;
                }
            }
            Section::Unavailable { .. } => {
                writeln!(f)?;
                writeln!(f, "⚠️ Tourist attractions are unavailable right now.")?;
            }
        }
        Ok(())
    }
}
