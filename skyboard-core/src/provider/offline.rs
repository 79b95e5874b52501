use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::Mutex;

use crate::{
    error::FetchError,
    model::{Condition, SearchQuery, WeatherReading},
};

use super::WeatherProvider;

/// Place name that always fails, so the error path can be seen without a network.
pub const NOT_FOUND_SENTINEL: &str = "Nowhere";

/// (condition, description, day icon code)
static CONDITIONS: &[(Condition, &str, &str)] = &[
    (Condition::Clear, "clear sky", "01d"),
    (Condition::Clouds, "scattered clouds", "03d"),
    (Condition::Rain, "light rain", "10d"),
    (Condition::Snow, "light snow", "13d"),
    (Condition::Thunderstorm, "thunderstorm", "11d"),
    (Condition::Mist, "mist", "50d"),
];

/// Synthesises plausible readings without any I/O.
#[derive(Debug)]
pub struct OfflineWeatherProvider {
    rng: Mutex<StdRng>,
}

impl OfflineWeatherProvider {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn synthesize(&self, place: &str) -> WeatherReading {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let (condition, description, icon) = &CONDITIONS[rng.random_range(0..CONDITIONS.len())];
        let temperature: i32 = rng.random_range(5..=34);
        let humidity: u8 = rng.random_range(40..=79);
        let wind: u32 = rng.random_range(5..=24);

        WeatherReading {
            place: place.to_string(),
            condition: condition.clone(),
            description: description.to_string(),
            temperature_c: f64::from(temperature),
            feels_like_c: f64::from(temperature - 2),
            humidity_pct: humidity,
            wind_speed_kmh: f64::from(wind),
            icon_code: icon.to_string(),
        }
    }
}

impl Default for OfflineWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OfflineWeatherProvider {
    async fn current(&self, query: &SearchQuery) -> Result<WeatherReading, FetchError> {
        if query.as_str().eq_ignore_ascii_case(NOT_FOUND_SENTINEL) {
            return Err(FetchError::NotFound);
        }

        let reading = self.synthesize(query.as_str());
        tracing::debug!(place = %reading.place, condition = reading.condition.as_str(), "synthesised reading");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sentinel_is_not_found_in_any_case() {
        let provider = OfflineWeatherProvider::with_seed(1);
        for name in ["Nowhere", "nowhere", "NOWHERE"] {
            let err = provider
                .current(&SearchQuery::parse(name).unwrap())
                .await
                .unwrap_err();
            assert!(err.to_string().starts_with("City not found"));
        }
    }

    #[tokio::test]
    async fn readings_stay_in_range() {
        let provider = OfflineWeatherProvider::with_seed(42);
        let query = SearchQuery::parse("Lisbon").unwrap();

        for _ in 0..200 {
            let r = provider.current(&query).await.unwrap();
            assert_eq!(r.place, "Lisbon");
            assert!((5.0..=34.0).contains(&r.temperature_c));
            assert!((40..=79).contains(&r.humidity_pct));
            assert!((5.0..=24.0).contains(&r.wind_speed_kmh));
            assert!(CONDITIONS.iter().any(|(c, _, icon)| *c == r.condition && *icon == r.icon_code));
        }
    }

    #[tokio::test]
    async fn same_seed_same_readings() {
        let a = OfflineWeatherProvider::with_seed(7);
        let b = OfflineWeatherProvider::with_seed(7);
        let query = SearchQuery::parse("Oslo").unwrap();

        for _ in 0..5 {
            assert_eq!(a.current(&query).await.unwrap(), b.current(&query).await.unwrap());
        }
    }
}
