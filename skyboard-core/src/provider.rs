use crate::{
    Config, FetchError, SearchQuery, Variant, WeatherReading,
    provider::{offline::OfflineWeatherProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod offline;
pub mod openweather;

/// Third-party services that need a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    NewsApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::NewsApi => "newsapi",
        }
    }

    /// Name used in user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OpenWeatherMap",
            ProviderId::NewsApi => "NewsAPI",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::NewsApi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "newsapi" => Ok(ProviderId::NewsApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, newsapi."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `query`.
    async fn current(&self, query: &SearchQuery) -> Result<WeatherReading, FetchError>;
}

/// Look up the API key for `id`, with a hint on how to set it.
pub(crate) fn required_api_key(id: ProviderId, config: &Config) -> anyhow::Result<&str> {
    config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `skyboard configure {id}` and enter your API key."
        )
    })
}

/// Construct the weather source for `variant`.
pub fn weather_provider_for(
    variant: Variant,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match variant {
        Variant::Offline => Box::new(OfflineWeatherProvider::new()),
        Variant::News | Variant::Music => {
            let api_key = required_api_key(ProviderId::OpenWeather, config)?;
            let provider = OpenWeatherProvider::new(api_key.to_owned());
            match config.provider_base_url(ProviderId::OpenWeather) {
                Some(url) => Box::new(provider.with_base_url(url)),
                None => Box::new(provider),
            }
        }
    };

    Ok(boxed)
}
