//! Rule-based intent classification for tourism queries
//!
//! A query asks for weather, for things to see, or for both. Classification is
//! a pure keyword match and never fails: a query with no recognised keyword is
//! treated as a sightseeing request.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// What the user wants to know about a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Weather,
    Places,
    Both,
}

impl Intent {
    #[must_use]
    pub fn wants_weather(self) -> bool {
        matches!(self, Intent::Weather | Intent::Both)
    }

    #[must_use]
    pub fn wants_places(self) -> bool {
        matches!(self, Intent::Places | Intent::Both)
    }

    /// Intent for an explicit weather/places selection; `None` if neither is set
    #[must_use]
    pub fn from_flags(weather: bool, places: bool) -> Option<Self> {
        match (weather, places) {
            (true, true) => Some(Intent::Both),
            (true, false) => Some(Intent::Weather),
            (false, true) => Some(Intent::Places),
            (false, false) => None,
        }
    }
}

impl Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Intent::Weather => "weather",
            Intent::Places => "places",
            Intent::Both => "weather + places",
        };
        f.write_str(label)
    }
}

const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "temperatures",
    "temp",
    "forecast",
    "rain",
    "raining",
    "rainy",
    "umbrella",
    "sunny",
    "sun",
    "snow",
    "snowing",
    "wind",
    "windy",
    "storm",
    "stormy",
    "cloudy",
    "clouds",
    "humid",
    "humidity",
    "hot",
    "cold",
    "warm",
    "degrees",
    "climate",
];

const PLACE_KEYWORDS: &[&str] = &[
    "visit",
    "visiting",
    "see",
    "sightseeing",
    "sights",
    "attraction",
    "attractions",
    "trip",
    "tour",
    "tours",
    "tourist",
    "explore",
    "place",
    "places",
    "museum",
    "museums",
    "landmark",
    "landmarks",
    "monument",
    "monuments",
    "itinerary",
    "plan",
    "recommend",
    "recommendations",
];

const PLACE_PHRASES: &[&str] = &["things to do", "what to do", "must see"];

/// Lower-cased word tokens of a query
///
/// Apostrophes stay inside words and a possessive `'s` is dropped, so
/// "Rome's" becomes "rome" and "what's" becomes "what".
pub(crate) fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .map(|word| word.trim_matches(|c: char| c == '\'' || c == '’'))
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            lower
                .strip_suffix("'s")
                .or_else(|| lower.strip_suffix("’s"))
                .map(str::to_string)
                .unwrap_or(lower)
        })
        .collect()
}

/// True if the lower-cased word belongs to either keyword class
pub(crate) fn is_keyword(word: &str) -> bool {
    WEATHER_KEYWORDS.contains(&word) || PLACE_KEYWORDS.contains(&word)
}

/// Classify a query as a weather, places or combined request
#[must_use]
pub fn classify(text: &str) -> Intent {
    let words = tokens(text);
    let wants_weather = words.iter().any(|w| WEATHER_KEYWORDS.contains(&w.as_str()));

    let padded = format!(" {} ", words.join(" "));
    let wants_places = words.iter().any(|w| PLACE_KEYWORDS.contains(&w.as_str()))
        || PLACE_PHRASES
            .iter()
            .any(|phrase| padded.contains(&format!(" {phrase} ")));

    match (wants_weather, wants_places) {
        (true, true) => Intent::Both,
        (true, false) => Intent::Weather,
        // No recognised keyword: a bare destination is a sightseeing request
        (false, _) => Intent::Places,
    }
}
