//! Open-Meteo weather agent (no API key required)

use std::time::Instant;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{info, instrument, warn};

use super::WeatherAgent;
use super::http::{build_client, get_json};
use crate::config::TourAiConfig;
use crate::models::{Location, WeatherReport};
use crate::{Result, TourAiError};

const SERVICE: &str = "weather";

/// Weather agent backed by the Open-Meteo forecast API
pub struct OpenMeteoWeatherAgent {
    client: ClientWithMiddleware,
    base_url: String,
}

/// `OpenMeteo` API response structures
mod openmeteo {
    use serde::Deserialize;

    /// Forecast response restricted to the fields the agent requests
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f32,
        pub weather_code: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        #[serde(rename = "precipitation_probability_max")]
        pub precipitation_probability: Option<Vec<Option<u8>>>,
    }
}

impl OpenMeteoWeatherAgent {
    pub fn new(config: &TourAiConfig) -> Result<Self> {
        let client = build_client(
            SERVICE,
            &config.http.user_agent,
            config.weather.timeout_seconds,
            config.http.max_retries,
        )?;
        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn forecast_url(&self, location: &Location) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,weather_code&daily=precipitation_probability_max&timezone=auto",
            self.base_url, location.latitude, location.longitude
        )
    }
}

/// Build a report from the raw forecast; today's rain chance defaults to 0
fn report_from_forecast(response: openmeteo::ForecastResponse) -> Result<WeatherReport> {
    let current = response.current.ok_or_else(|| {
        TourAiError::api(SERVICE, "no current weather data in Open-Meteo response")
    })?;

    let rain_chance = response
        .daily
        .and_then(|daily| daily.precipitation_probability)
        .and_then(|probabilities| probabilities.into_iter().next().flatten())
        .unwrap_or(0);

    Ok(WeatherReport::new(
        current.temperature,
        current.weather_code,
        rain_chance,
    ))
}

#[async_trait]
impl WeatherAgent for OpenMeteoWeatherAgent {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn current_weather(&self, location: &Location) -> Result<WeatherReport> {
        info!(
            "Getting current weather for coordinates: {}",
            location.format_coordinates()
        );
        let start_time = Instant::now();

        let response: openmeteo::ForecastResponse =
            get_json(&self.client, SERVICE, &self.forecast_url(location)).await?;
        let report = report_from_forecast(response)?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved weather for {} in {:.3}s: {}, {}",
            location.name,
            total_duration.as_secs_f64(),
            report.format_temperature(),
            report.description
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow weather API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(report)
    }
}
