//! Parent agent that turns one query into one merged response
//!
//! The pipeline is: extract a destination, geocode it, classify the intent,
//! then ask the weather and/or places agent. An unknown destination stops the
//! pipeline early; a failing agent only marks its own section unavailable.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::agents::{
    Geocoder, NominatimGeocoder, OpenMeteoWeatherAgent, OverpassPlacesAgent, PlacesAgent,
    WeatherAgent,
};
use crate::config::{DEFAULT_AGENT_TIMEOUT_SECONDS, TourAiConfig};
use crate::extract::extract_location;
use crate::intent::{Intent, classify};
use crate::models::{
    Attraction, Location, MAX_ATTRACTIONS, Response, ResponseError, Section, WeatherReport,
};

const DEFAULT_AGENT_TIMEOUT: Duration =
    Duration::from_secs(DEFAULT_AGENT_TIMEOUT_SECONDS as u64);

/// Routes queries to the geocoder and child agents
#[derive(Clone)]
pub struct Orchestrator {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherAgent>,
    places: Arc<dyn PlacesAgent>,
    max_attractions: usize,
    agent_timeout: Duration,
}

impl Orchestrator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherAgent>,
        places: Arc<dyn PlacesAgent>,
    ) -> Self {
        Self {
            geocoder,
            weather,
            places,
            max_attractions: MAX_ATTRACTIONS,
            agent_timeout: DEFAULT_AGENT_TIMEOUT,
        }
    }

    /// Wire the public-API agents described by `config`
    pub fn from_config(config: &TourAiConfig) -> crate::Result<Self> {
        let orchestrator = Self::new(
            Arc::new(NominatimGeocoder::new(config)?),
            Arc::new(OpenMeteoWeatherAgent::new(config)?),
            Arc::new(OverpassPlacesAgent::new(config)?),
        )
        .with_max_attractions(config.places.max_results as usize)
        .with_agent_timeout(Duration::from_secs(config.agents.timeout_seconds.into()));
        Ok(orchestrator)
    }

    /// Limit the attraction list; clamped to `1..=MAX_ATTRACTIONS`
    #[must_use]
    pub fn with_max_attractions(mut self, max: usize) -> Self {
        self.max_attractions = max.clamp(1, MAX_ATTRACTIONS);
        self
    }

    /// Upper bound for each agent call
    #[must_use]
    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    /// Answer a natural-language query
    #[instrument(skip(self))]
    pub async fn handle(&self, text: &str) -> Response {
        let Some(candidate) = extract_location(text) else {
            info!("No destination found in query");
            return Response::failed(text, ResponseError::LocationNotFound { candidate: None });
        };
        debug!("Extracted destination candidate '{}'", candidate);

        let location = match self.resolve(&candidate).await {
            Ok(location) => location,
            Err(error) => return Response::failed(text, error),
        };

        let intent = classify(text);
        info!("Classified query as {}", intent);
        self.dispatch(text, intent, location).await
    }

    /// Answer an explicit request: a destination plus what to look up
    #[instrument(skip(self))]
    pub async fn handle_destination(&self, destination: &str, intent: Intent) -> Response {
        let destination = destination.trim();
        if destination.is_empty() {
            return Response::failed(destination, ResponseError::LocationNotFound { candidate: None });
        }

        match self.resolve(destination).await {
            Ok(location) => self.dispatch(destination, intent, location).await,
            Err(error) => Response::failed(destination, error),
        }
    }

    async fn resolve(&self, candidate: &str) -> Result<Location, ResponseError> {
        match self.geocoder.resolve(candidate).await {
            Ok(Some(location)) => {
                info!("Resolved '{}' to {}", candidate, location.display_name);
                Ok(location)
            }
            Ok(None) => {
                info!("Unknown location '{}'", candidate);
                Err(ResponseError::LocationNotFound {
                    candidate: Some(candidate.to_string()),
                })
            }
            Err(e) => {
                warn!("Geocoding '{}' failed: {}", candidate, e);
                Err(ResponseError::GeocoderUnavailable {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Run the requested agents concurrently and merge their sections
    async fn dispatch(&self, query: &str, intent: Intent, location: Location) -> Response {
        let weather = async {
            if intent.wants_weather() {
                self.fetch_weather(&location).await
            } else {
                Section::Skipped
            }
        };
        let places = async {
            if intent.wants_places() {
                self.fetch_places(&location).await
            } else {
                Section::Skipped
            }
        };
        let (weather, places) = futures::join!(weather, places);

        Response {
            query: query.to_string(),
            intent: Some(intent),
            location: Some(location),
            weather,
            places,
            error: None,
        }
    }

    async fn fetch_weather(&self, location: &Location) -> Section<WeatherReport> {
        self.guarded("weather", self.weather.current_weather(location))
            .await
    }

    async fn fetch_places(&self, location: &Location) -> Section<Vec<Attraction>> {
        let limit = self.max_attractions;
        match self
            .guarded("places", self.places.attractions(location, limit))
            .await
        {
            Section::Ready(mut attractions) => {
                if attractions.len() > limit {
                    debug!(
                        "Places agent returned {} attractions, keeping {}",
                        attractions.len(),
                        limit
                    );
                    attractions.truncate(limit);
                }
                Section::Ready(attractions)
            }
            other => other,
        }
    }

    /// Await an agent call under the timeout, turning failures into a marker
    async fn guarded<T>(
        &self,
        agent: &str,
        call: impl Future<Output = crate::Result<T>>,
    ) -> Section<T> {
        match tokio::time::timeout(self.agent_timeout, call).await {
            Ok(Ok(value)) => Section::Ready(value),
            Ok(Err(e)) => {
                warn!("{} agent failed: {}", agent, e);
                Section::Unavailable {
                    reason: e.user_message(),
                }
            }
            Err(_) => {
                warn!(
                    "{} agent timed out after {:.1}s",
                    agent,
                    self.agent_timeout.as_secs_f64()
                );
                Section::Unavailable {
                    reason: format!("timed out after {}s", self.agent_timeout.as_secs()),
                }
            }
        }
    }
}
