//! Weather report model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at a destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// When the report was fetched
    pub observed_at: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// WMO weather interpretation code
    pub weather_code: u8,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Chance of precipitation today (0-100%)
    pub rain_chance: u8,
}

impl WeatherReport {
    /// Build a report from a WMO code, deriving the description
    #[must_use]
    pub fn new(temperature: f32, weather_code: u8, rain_chance: u8) -> Self {
        Self {
            observed_at: Utc::now(),
            temperature,
            weather_code,
            description: weather_code_to_description(weather_code).to_string(),
            rain_chance: rain_chance.min(100),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format precipitation chance with unit
    #[must_use]
    pub fn format_rain_chance(&self) -> String {
        format!("{}%", self.rain_chance)
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
