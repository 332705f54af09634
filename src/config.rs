//! Configuration management for `TourAI` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TourAiError;
use crate::models::MAX_ATTRACTIONS;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TourAI` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourAiConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Attraction search configuration
    #[serde(default)]
    pub places: PlacesConfig,
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Orchestration settings
    #[serde(default)]
    pub agents: AgentsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geocoding (Nominatim) configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
}

/// Weather API (Open-Meteo) configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Attraction search (Overpass) configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_places_timeout")]
    pub timeout_seconds: u32,
    /// Search radius around the destination in meters
    #[serde(default = "default_places_radius")]
    pub search_radius_m: u32,
    /// Maximum number of attractions to return
    #[serde(default = "default_places_max_results")]
    pub max_results: u32,
}

/// HTTP settings shared by all agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request (Nominatim rejects anonymous clients)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Upper bound for a single agent call, retries included
    #[serde(default = "default_agent_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_places_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_places_timeout() -> u32 {
    30
}

fn default_places_radius() -> u32 {
    15_000
}

fn default_places_max_results() -> u32 {
    MAX_ATTRACTIONS as u32
}

fn default_user_agent() -> String {
    format!("TourAI/{}", crate::VERSION)
}

fn default_max_retries() -> u32 {
    2
}

/// Agent call bound; above the 30 s Overpass timeout so retries still fit
pub(crate) const DEFAULT_AGENT_TIMEOUT_SECONDS: u32 = 45;

fn default_agent_timeout() -> u32 {
    DEFAULT_AGENT_TIMEOUT_SECONDS
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_geocoding_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_places_base_url(),
            timeout_seconds: default_places_timeout(),
            search_radius_m: default_places_radius(),
            max_results: default_places_max_results(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_agent_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TourAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let explicit = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if explicit && !config_file.exists() {
            return Err(TourAiError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides such as TOURAI_PLACES__SEARCH_RADIUS_M=5000
        builder = builder.add_source(
            Environment::with_prefix("TOURAI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TourAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourai").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_places_timeout();
        }
        if self.places.search_radius_m == 0 {
            self.places.search_radius_m = default_places_radius();
        }
        if self.places.max_results == 0 {
            self.places.max_results = default_places_max_results();
        }
        if self.http.user_agent.trim().is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.agents.timeout_seconds == 0 {
            self.agents.timeout_seconds = default_agent_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Weather API", self.weather.timeout_seconds),
            ("Places API", self.places.timeout_seconds),
            ("Agent", self.agents.timeout_seconds),
        ];
        for (service, timeout) in timeouts {
            if timeout > 300 {
                return Err(TourAiError::config(format!(
                    "{service} timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if self.http.max_retries > 10 {
            return Err(TourAiError::config("HTTP max retries cannot exceed 10").into());
        }

        if self.places.search_radius_m > 50_000 {
            return Err(
                TourAiError::config("Attraction search radius cannot exceed 50000 m").into(),
            );
        }

        if self.places.max_results as usize > MAX_ATTRACTIONS {
            return Err(TourAiError::config(format!(
                "Maximum attractions cannot exceed {MAX_ATTRACTIONS}"
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather API", &self.weather.base_url),
            ("Places API", &self.places.base_url),
        ];
        for (service, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TourAiError::config(format!(
                    "{service} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
