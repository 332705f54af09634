//! Orchestrator behaviour against in-process agent doubles

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tourai::{
    Attraction, Geocoder, Intent, Location, Orchestrator, PlacesAgent, ResponseError, Section,
    TourAiError, WeatherAgent, WeatherReport,
};

/// Geocoder that knows a fixed set of cities
struct FakeGeocoder {
    known: HashMap<String, Location>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    fn new() -> Self {
        let known = [
            ("barcelona", Location::new("Barcelona", "Barcelona, Catalunya, España", 41.3828, 2.1769)),
            ("rome", Location::new("Rome", "Roma, Lazio, Italia", 41.8933, 12.4829)),
            ("dubai", Location::new("Dubai", "Dubai, United Arab Emirates", 25.2653, 55.2925)),
        ]
        .into_iter()
        .map(|(key, location)| (key.to_string(), location))
        .collect();
        Self {
            known,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn resolve(&self, name: &str) -> tourai::Result<Option<Location>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TourAiError::api("geocoding", "HTTP 503"));
        }
        Ok(self.known.get(&name.to_lowercase()).cloned())
    }
}

struct FakeWeather {
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeWeather {
    fn ok() -> Self {
        Self {
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::ok()
        }
    }
}

#[async_trait]
impl WeatherAgent for FakeWeather {
    async fn current_weather(&self, _location: &Location) -> tourai::Result<WeatherReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(TourAiError::api("weather", "connection refused"));
        }
        Ok(WeatherReport::new(24.5, 1, 10))
    }
}

/// Places agent that returns `count` attractions, ignoring the requested limit
struct FakePlaces {
    count: usize,
    fail: bool,
    calls: AtomicUsize,
}

impl FakePlaces {
    fn returning(count: usize) -> Self {
        Self {
            count,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::returning(0)
        }
    }
}

#[async_trait]
impl PlacesAgent for FakePlaces {
    async fn attractions(&self, location: &Location, _limit: usize) -> tourai::Result<Vec<Attraction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TourAiError::api("places", "HTTP 504"));
        }
        Ok((0..self.count)
            .map(|i| {
                Attraction::new(
                    format!("Sight {i}"),
                    "Attraction",
                    location.latitude,
                    location.longitude,
                )
            })
            .collect())
    }
}

struct Harness {
    geocoder: Arc<FakeGeocoder>,
    weather: Arc<FakeWeather>,
    places: Arc<FakePlaces>,
    orchestrator: Orchestrator,
}

fn harness(geocoder: FakeGeocoder, weather: FakeWeather, places: FakePlaces) -> Harness {
    let geocoder = Arc::new(geocoder);
    let weather = Arc::new(weather);
    let places = Arc::new(places);
    let orchestrator = Orchestrator::new(geocoder.clone(), weather.clone(), places.clone());
    Harness {
        geocoder,
        weather,
        places,
        orchestrator,
    }
}

fn default_harness() -> Harness {
    harness(FakeGeocoder::new(), FakeWeather::ok(), FakePlaces::returning(3))
}

#[tokio::test]
async fn weather_query_returns_only_weather() {
    let h = default_harness();
    let response = h.orchestrator.handle("What's the weather in Barcelona?").await;

    assert!(response.is_success());
    assert_eq!(response.intent, Some(Intent::Weather));
    assert_eq!(response.location.as_ref().unwrap().name, "Barcelona");
    assert!(matches!(response.weather, Section::Ready(_)));
    assert!(response.places.is_skipped());
    assert_eq!(h.places.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn trip_query_returns_only_places() {
    let h = default_harness();
    let response = h.orchestrator.handle("I'm going to Rome, let's plan my trip").await;

    assert_eq!(response.intent, Some(Intent::Places));
    assert_eq!(response.location.as_ref().unwrap().name, "Rome");
    assert!(response.weather.is_skipped());
    let attractions = response.places.ready().unwrap();
    assert!(!attractions.is_empty() && attractions.len() <= 5);
    assert_eq!(h.weather.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn combined_query_returns_both_sections() {
    let h = default_harness();
    let response = h
        .orchestrator
        .handle("What's the temperature in Dubai and what can I visit?")
        .await;

    assert_eq!(response.intent, Some(Intent::Both));
    assert_eq!(response.weather.ready().unwrap().temperature, 24.5);
    assert_eq!(response.attractions().len(), 3);
}

#[tokio::test]
async fn unknown_place_short_circuits() {
    let h = default_harness();
    let response = h.orchestrator.handle("What's the weather in Atlantis?").await;

    assert_eq!(
        response.error,
        Some(ResponseError::LocationNotFound {
            candidate: Some("Atlantis".to_string())
        })
    );
    assert_eq!(response.intent, None);
    assert_eq!(response.location, None);
    assert!(response.weather.is_skipped());
    assert!(response.places.is_skipped());
    assert_eq!(h.weather.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.places.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn query_without_destination_skips_geocoding() {
    let h = default_harness();
    let response = h.orchestrator.handle("what's the weather?").await;

    assert_eq!(
        response.error,
        Some(ResponseError::LocationNotFound { candidate: None })
    );
    assert_eq!(h.geocoder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn geocoder_outage_aborts_without_agent_calls() {
    let h = harness(FakeGeocoder::failing(), FakeWeather::ok(), FakePlaces::returning(3));
    let response = h.orchestrator.handle("weather and sights in Rome").await;

    assert!(matches!(
        response.error,
        Some(ResponseError::GeocoderUnavailable { .. })
    ));
    assert_eq!(h.weather.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.places.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn weather_failure_keeps_places() {
    let h = harness(FakeGeocoder::new(), FakeWeather::failing(), FakePlaces::returning(4));
    let response = h
        .orchestrator
        .handle("What's the temperature in Dubai and what can I visit?")
        .await;

    assert!(response.is_success());
    match &response.weather {
        Section::Unavailable { reason } => {
            assert_eq!(
                reason,
                "The weather service is unavailable right now. Please try again later."
            );
        }
        other => panic!("expected unavailable weather, got {other:?}"),
    }
    assert_eq!(response.attractions().len(), 4);
}

#[tokio::test]
async fn places_failure_keeps_weather() {
    let h = harness(FakeGeocoder::new(), FakeWeather::ok(), FakePlaces::failing());
    let response = h
        .orchestrator
        .handle("What's the temperature in Dubai and what can I visit?")
        .await;

    assert!(response.is_success());
    assert!(response.places.is_unavailable());
    assert!(response.weather.ready().is_some());
}

#[tokio::test]
async fn attractions_never_exceed_five() {
    let h = harness(FakeGeocoder::new(), FakeWeather::ok(), FakePlaces::returning(12));
    let response = h.orchestrator.handle("attractions in Rome").await;
    assert_eq!(response.attractions().len(), 5);

    let h = harness(FakeGeocoder::new(), FakeWeather::ok(), FakePlaces::returning(12));
    let orchestrator = h.orchestrator.with_max_attractions(50);
    let response = orchestrator.handle("attractions in Rome").await;
    assert_eq!(response.attractions().len(), 5);
}

#[tokio::test]
async fn configured_limit_below_five_is_respected() {
    let h = harness(FakeGeocoder::new(), FakeWeather::ok(), FakePlaces::returning(12));
    let orchestrator = h.orchestrator.with_max_attractions(2);
    let response = orchestrator.handle("attractions in Rome").await;
    assert_eq!(response.attractions().len(), 2);
}

#[tokio::test]
async fn slow_agent_is_marked_unavailable() {
    let h = harness(
        FakeGeocoder::new(),
        FakeWeather::slow(Duration::from_secs(5)),
        FakePlaces::returning(2),
    );
    let orchestrator = h
        .orchestrator
        .with_agent_timeout(Duration::from_millis(50));
    let response = orchestrator.handle("weather and sights in Rome").await;

    match &response.weather {
        Section::Unavailable { reason } => assert!(reason.contains("timed out")),
        other => panic!("expected timeout marker, got {other:?}"),
    }
    assert_eq!(response.attractions().len(), 2);
}

#[tokio::test]
async fn explicit_destination_uses_given_intent() {
    let h = default_harness();
    let response = h.orchestrator.handle_destination("Rome", Intent::Weather).await;

    assert_eq!(response.intent, Some(Intent::Weather));
    assert!(response.weather.ready().is_some());
    assert!(response.places.is_skipped());

    let response = h.orchestrator.handle_destination("  ", Intent::Both).await;
    assert_eq!(
        response.error,
        Some(ResponseError::LocationNotFound { candidate: None })
    );
}

#[tokio::test]
async fn response_serializes_to_json() {
    let h = default_harness();
    let response = h.orchestrator.handle("weather in Barcelona").await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["intent"], "weather");
    assert_eq!(json["location"]["name"], "Barcelona");
    assert_eq!(json["weather"]["status"], "ready");
    assert_eq!(json["places"]["status"], "skipped");
    assert!(json["error"].is_null());
}
