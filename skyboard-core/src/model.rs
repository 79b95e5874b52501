use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A trimmed, non-empty place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Primary weather condition as reported in `weather[0].main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Other(String),
}

impl Condition {
    pub fn from_provider(main: &str) -> Self {
        match main {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            "Mist" => Self::Mist,
            "Fog" => Self::Fog,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Other(name) => name,
        }
    }
}

/// Current conditions for one place, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub place: String,
    pub condition: Condition,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    /// Unrounded; rounding happens at render time.
    pub wind_speed_kmh: f64,
    pub icon_code: String,
}

/// Converts a provider wind speed in m/s to km/h.
pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

/// A news article or a music recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
    /// Source name for articles, genre for recommendations.
    pub source: String,
    /// Rendered date for articles, mood for recommendations.
    pub label: String,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Everything a successful search puts on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub reading: WeatherReading,
    pub icon: &'static str,
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Success(Box<SearchOutcome>),
    Error(String),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed() {
        let q = SearchQuery::parse("  Paris \n").unwrap();
        assert_eq!(q.as_str(), "Paris");
    }

    #[test]
    fn whitespace_query_is_rejected() {
        assert_eq!(SearchQuery::parse(" \t "), Err(SearchError::EmptyQuery));
        assert_eq!(SearchQuery::parse(""), Err(SearchError::EmptyQuery));
    }

    #[test]
    fn unknown_condition_is_kept_verbatim() {
        let c = Condition::from_provider("Haze");
        assert_eq!(c, Condition::Other("Haze".to_string()));
        assert_eq!(c.as_str(), "Haze");
    }

    #[test]
    fn condition_parse_is_case_sensitive() {
        assert_eq!(Condition::from_provider("Rain"), Condition::Rain);
        assert!(matches!(Condition::from_provider("rain"), Condition::Other(_)));
    }

    #[test]
    fn wind_conversion() {
        assert_eq!(mps_to_kmh(10.0).round(), 36.0);
        assert_eq!(mps_to_kmh(5.0).round(), 18.0);
    }
}
