//! Nominatim (OpenStreetMap) geocoding agent

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::Geocoder;
use super::http::{build_client, get_json};
use crate::config::TourAiConfig;
use crate::models::Location;
use crate::{Result, TourAiError};

const SERVICE: &str = "geocoding";

/// Geocoder backed by the public Nominatim search API
pub struct NominatimGeocoder {
    client: ClientWithMiddleware,
    base_url: String,
}

/// One search hit from Nominatim
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    /// Latitude as a decimal string
    lat: String,
    /// Longitude as a decimal string
    lon: String,
    display_name: String,
    name: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(config: &TourAiConfig) -> Result<Self> {
        let client = build_client(
            SERVICE,
            &config.http.user_agent,
            config.geocoding.timeout_seconds,
            config.http.max_retries,
        )?;
        Ok(Self {
            client,
            base_url: config.geocoding.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, name: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(name)
        )
    }
}

impl NominatimPlace {
    fn into_location(self, query: &str) -> Result<Location> {
        let latitude = self
            .lat
            .parse::<f64>()
            .map_err(|_| TourAiError::api(SERVICE, format!("invalid latitude '{}'", self.lat)))?;
        let longitude = self
            .lon
            .parse::<f64>()
            .map_err(|_| TourAiError::api(SERVICE, format!("invalid longitude '{}'", self.lon)))?;

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.to_string());
        Ok(Location::new(name, self.display_name, latitude, longitude))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, name: &str) -> Result<Option<Location>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Empty place name, nothing to geocode");
            return Ok(None);
        }

        info!("Geocoding location: '{}'", name);
        let places: Vec<NominatimPlace> = get_json(&self.client, SERVICE, &self.search_url(name)).await?;

        match places.into_iter().next() {
            Some(place) => {
                let location = place.into_location(name)?;
                debug!(
                    "Resolved '{}' to {} ({})",
                    name,
                    location.display_name,
                    location.format_coordinates()
                );
                Ok(Some(location))
            }
            None => {
                warn!("No results found for location '{}'", name);
                Ok(None)
            }
        }
    }
}
