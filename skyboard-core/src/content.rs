//! Secondary content shown under the weather card.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use std::fmt::Debug;

use crate::{
    Config, ContentItem, FetchError, SearchQuery, Variant,
    content::{newsapi::NewsApiClient, offline::OfflineNewsProvider},
    provider::{ProviderId, required_api_key},
};

pub mod newsapi;
pub mod offline;

/// Content keyed on the place name, fetched alongside the weather.
#[async_trait]
pub trait ContentProvider: Send + Sync + Debug {
    /// Up to three items, most recent first.
    async fn for_place(&self, query: &SearchQuery) -> Result<Vec<ContentItem>, FetchError>;
}

/// Where the dashboard gets its secondary content from.
#[derive(Debug)]
pub enum ContentSource {
    /// Fetched concurrently with the weather. A failure fails the search only
    /// when `required` is set.
    Place {
        provider: Box<dyn ContentProvider>,
        required: bool,
    },
    /// Recommendations derived from the reading; no I/O, never fails.
    Music,
}

/// Construct the content source for `variant`.
pub fn content_source_for(variant: Variant, config: &Config) -> anyhow::Result<ContentSource> {
    let source = match variant {
        Variant::Music => ContentSource::Music,
        Variant::Offline => ContentSource::Place {
            provider: Box::new(OfflineNewsProvider),
            required: true,
        },
        Variant::News => {
            let client = match &config.news.proxy_url {
                Some(proxy) => NewsApiClient::via_proxy(proxy),
                None => {
                    let api_key = required_api_key(ProviderId::NewsApi, config)?;
                    let client = NewsApiClient::direct(api_key.to_owned());
                    match config.provider_base_url(ProviderId::NewsApi) {
                        Some(url) => client.with_base_url(url),
                        None => client,
                    }
                }
            };
            ContentSource::Place {
                provider: Box::new(client),
                required: config.news.required,
            }
        }
    };

    Ok(source)
}

/// Article dates are shown as a local calendar date.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%b %-d, %Y").to_string()
}
