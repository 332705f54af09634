//! Overpass (OpenStreetMap) attraction agent

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::PlacesAgent;
use super::http::{build_client, get_json};
use crate::Result;
use crate::config::TourAiConfig;
use crate::models::{Attraction, Location};

const SERVICE: &str = "places";

/// Elements requested per returned attraction; Overpass answers in its own
/// order, so distance ranking only sees what fits under this cap
const CANDIDATES_PER_RESULT: usize = 10;

/// OSM tag filters for points of interest worth a visit
const TOURISM_FILTER: &str = "attraction|museum|artwork|viewpoint|gallery";
const HISTORIC_FILTER: &str = "monument|castle|memorial|ruins";

/// Places agent backed by an Overpass API interpreter
pub struct OverpassPlacesAgent {
    client: ClientWithMiddleware,
    base_url: String,
    radius_m: u32,
    timeout_seconds: u32,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    /// Present for ways when queried with `out center`
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        }
    }

    fn kind(&self) -> String {
        let tag = self
            .tags
            .get("tourism")
            .or_else(|| self.tags.get("historic"))
            .map_or("attraction", String::as_str);
        Attraction::format_kind(tag)
    }
}

impl OverpassPlacesAgent {
    pub fn new(config: &TourAiConfig) -> Result<Self> {
        let client = build_client(
            SERVICE,
            &config.http.user_agent,
            config.places.timeout_seconds,
            config.http.max_retries,
        )?;
        Ok(Self {
            client,
            base_url: config.places.base_url.clone(),
            radius_m: config.places.search_radius_m,
            timeout_seconds: config.places.timeout_seconds,
        })
    }

    /// Overpass QL for named attractions and historic sites around a point
    fn build_query(&self, location: &Location, limit: usize) -> String {
        let around = format!(
            "around:{},{},{}",
            self.radius_m, location.latitude, location.longitude
        );
        format!(
            "[out:json][timeout:{timeout}];(\
             node[\"tourism\"~\"{TOURISM_FILTER}\"][\"name\"]({around});\
             way[\"tourism\"~\"{TOURISM_FILTER}\"][\"name\"]({around});\
             node[\"historic\"~\"{HISTORIC_FILTER}\"][\"name\"]({around});\
             way[\"historic\"~\"{HISTORIC_FILTER}\"][\"name\"]({around});\
             );out center {count};",
            timeout = self.timeout_seconds,
            count = limit * CANDIDATES_PER_RESULT,
        )
    }

    fn query_url(&self, query: &str) -> String {
        format!("{}?data={}", self.base_url, urlencoding::encode(query))
    }
}

/// Turn raw Overpass elements into the `limit` closest of them
///
/// Elements without a name or coordinates are skipped and only the first
/// element with a given name is kept. Ties in distance are broken by name so
/// the ranking is stable for a given upstream answer.
fn rank_attractions(
    location: &Location,
    elements: Vec<OverpassElement>,
    limit: usize,
) -> Vec<Attraction> {
    let mut seen_names = HashSet::new();
    let mut attractions: Vec<Attraction> = elements
        .into_iter()
        .filter_map(|element| {
            let (lat, lon) = element.coordinates()?;
            let name = element.tags.get("name")?.trim();
            if name.is_empty() || !seen_names.insert(name.to_string()) {
                return None;
            }
            let mut attraction = Attraction::new(name, element.kind(), lat, lon);
            attraction.distance_km = Some(location.distance_km(lat, lon));
            Some(attraction)
        })
        .collect();

    attractions.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    attractions.truncate(limit);
    attractions
}

#[async_trait]
impl PlacesAgent for OverpassPlacesAgent {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn attractions(&self, location: &Location, limit: usize) -> Result<Vec<Attraction>> {
        info!(
            "Searching attractions within {}m of {}",
            self.radius_m,
            location.format_coordinates()
        );
        let query = self.build_query(location, limit);
        debug!("Overpass query: {}", query);

        let response: OverpassResponse =
            get_json(&self.client, SERVICE, &self.query_url(&query)).await?;
        let total = response.elements.len();
        let attractions = rank_attractions(location, response.elements, limit);

        info!(
            "Found {} attractions near {} ({} raw elements)",
            attractions.len(),
            location.name,
            total
        );
        Ok(attractions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rome() -> Location {
        Location::new("Rome", "Roma, Lazio, Italia", 41.8933, 12.4829)
    }

    fn elements(body: &str) -> Vec<OverpassElement> {
        serde_json::from_str::<OverpassResponse>(body).unwrap().elements
    }

    const BODY: &str = r#"{
        "version": 0.6,
        "elements": [
            {"type": "way", "id": 1, "center": {"lat": 41.8902, "lon": 12.4922},
             "tags": {"name": "Colosseo", "tourism": "attraction", "historic": "monument"}},
            {"type": "node", "id": 2, "lat": 41.9029, "lon": 12.4534,
             "tags": {"name": "Musei Vaticani", "tourism": "museum"}},
            {"type": "node", "id": 3, "lat": 41.8986, "lon": 12.4769,
             "tags": {"name": "Pantheon", "historic": "memorial"}},
            {"type": "node", "id": 4, "lat": 41.8990, "lon": 12.4770,
             "tags": {"name": "Pantheon", "tourism": "attraction"}},
            {"type": "node", "id": 5, "lat": 41.9, "lon": 12.48,
             "tags": {"tourism": "artwork"}},
            {"type": "way", "id": 6,
             "tags": {"name": "No Coordinates", "tourism": "viewpoint"}},
            {"type": "node", "id": 7, "lat": 41.9058, "lon": 12.4823,
             "tags": {"name": "Fontana di Trevi", "tourism": "city_gate"}}
        ]
    }"#;

    #[test]
    fn test_rank_skips_unnamed_duplicates_and_missing_coordinates() {
        let ranked = rank_attractions(&rome(), elements(BODY), 10);
        let names: Vec<&str> = ranked.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(names.len(), 4);
        assert!(!names.contains(&"No Coordinates"));
        assert_eq!(names.iter().filter(|n| **n == "Pantheon").count(), 1);
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let ranked = rank_attractions(&rome(), elements(BODY), 10);
        let distances: Vec<f64> = ranked.iter().map(|a| a.distance_km.unwrap()).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(ranked.last().unwrap().name, "Musei Vaticani");
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let ranked = rank_attractions(&rome(), elements(BODY), 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_kind_prefers_tourism_tag() {
        let ranked = rank_attractions(&rome(), elements(BODY), 10);
        let kind_of = |name: &str| {
            ranked
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.kind.clone())
                .unwrap()
        };
        assert_eq!(kind_of("Colosseo"), "Attraction");
        assert_eq!(kind_of("Pantheon"), "Memorial");
        assert_eq!(kind_of("Fontana di Trevi"), "City Gate");
    }

    #[test]
    fn test_empty_response() {
        assert!(rank_attractions(&rome(), elements(r#"{"elements": []}"#), 5).is_empty());
        assert!(rank_attractions(&rome(), elements("{}"), 5).is_empty());
    }

    #[test]
    fn test_query_mentions_radius_and_limit() {
        let agent = OverpassPlacesAgent::new(&TourAiConfig::default()).unwrap();
        let query = agent.build_query(&rome(), 5);
        assert!(query.contains("around:15000,41.8933,12.4829"));
        assert!(query.contains("out center 50;"));
        assert!(query.contains(TOURISM_FILTER));

        let url = agent.query_url(&query);
        assert!(url.starts_with("https://overpass-api.de/api/interpreter?data=%5Bout%3Ajson%5D"));
    }
}
