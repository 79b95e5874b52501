use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{Condition, SearchQuery, WeatherReading, mps_to_kmh},
};

use super::{ProviderId, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const PROVIDER: &str = "OpenWeatherMap";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_current(&self, place: &str) -> Result<WeatherReading, FetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", place),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;

        tracing::debug!(provider = ProviderId::OpenWeather.as_str(), %status, "weather response");

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            tracing::warn!(%status, body = %body, "weather request failed");
            return Err(FetchError::from_status(PROVIDER, status, &body));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| decode(e.to_string()))?;
        parsed.into_reading(place)
    }
}

fn decode(message: impl Into<String>) -> FetchError {
    FetchError::Decode {
        provider: PROVIDER,
        message: message.into(),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_reading(self, place: &str) -> Result<WeatherReading, FetchError> {
        let weather = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| decode("response contained no weather entry"))?;

        if !self.main.temp.is_finite() || !self.main.feels_like.is_finite() {
            return Err(decode("temperature is not a finite number"));
        }

        let place = if self.name.is_empty() {
            place.to_string()
        } else {
            self.name
        };

        Ok(WeatherReading {
            place,
            condition: Condition::from_provider(&weather.main),
            description: weather.description,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_kmh: mps_to_kmh(self.wind.speed),
            icon_code: weather.icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &SearchQuery) -> Result<WeatherReading, FetchError> {
        self.fetch_current(query.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn paris_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Paris",
            "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 12.4, "feels_like": 11.8, "humidity": 82},
            "wind": {"speed": 5}
        })
    }

    async fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::new("KEY".into()).with_base_url(server.uri())
    }

    fn paris() -> SearchQuery {
        SearchQuery::parse("Paris").unwrap()
    }

    #[tokio::test]
    async fn parses_current_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
            .expect(1)
            .mount(&server)
            .await;

        let reading = provider_for(&server).await.current(&paris()).await.unwrap();

        assert_eq!(reading.place, "Paris");
        assert_eq!(reading.condition, Condition::Rain);
        assert_eq!(reading.description, "light rain");
        assert_eq!(reading.temperature_c, 12.4);
        assert_eq!(reading.feels_like_c, 11.8);
        assert_eq!(reading.humidity_pct, 82);
        assert_eq!(reading.wind_speed_kmh.round(), 18.0);
        assert_eq!(reading.icon_code, "10d");
    }

    #[tokio::test]
    async fn not_found_suggests_spelling() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).await.current(&paris()).await.unwrap_err();

        assert!(matches!(err, FetchError::NotFound));
        assert!(err.to_string().starts_with("City not found"));
        assert!(err.to_string().contains("spelling"));
    }

    #[tokio::test]
    async fn unauthorized_and_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Locked"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "Busy"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;

        let err = provider
            .current(&SearchQuery::parse("Locked").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unauthorized { .. }));

        let err = provider
            .current(&SearchQuery::parse("Busy").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn other_status_carries_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = provider_for(&server).await.current(&paris()).await.unwrap_err();

        match err {
            FetchError::Provider { status, body, .. } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_weather_array_is_a_decode_error() {
        let server = MockServer::start().await;
        let mut body = paris_body();
        body["weather"] = serde_json::json!([]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = provider_for(&server).await.current(&paris()).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn missing_name_falls_back_to_query() {
        let server = MockServer::start().await;
        let mut body = paris_body();
        body.as_object_mut().unwrap().remove("name");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let reading = provider_for(&server).await.current(&paris()).await.unwrap();

        assert_eq!(reading.place, "Paris");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let provider = OpenWeatherProvider::new("KEY".into()).with_base_url("http://127.0.0.1:1");

        let err = provider.current(&paris()).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
        assert!(err.to_string().starts_with("Network error"));
    }
}
