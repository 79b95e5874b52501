use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    lookup::MAX_ITEMS,
    model::{ContentItem, SearchQuery},
};

use super::{ContentProvider, format_date};

const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const PROVIDER: &str = "NewsAPI";
const REMOVED: &str = "[Removed]";

#[derive(Debug, Clone)]
enum Endpoint {
    /// Talks to NewsAPI with a local key.
    Direct { base_url: String, api_key: String },
    /// Talks to `skyboard-proxy`, which holds the key.
    Proxy { base_url: String },
}

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    endpoint: Endpoint,
    http: Client,
}

impl NewsApiClient {
    pub fn direct(api_key: String) -> Self {
        Self {
            endpoint: Endpoint::Direct {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key,
            },
            http: Client::new(),
        }
    }

    pub fn via_proxy(proxy_url: &str) -> Self {
        Self {
            endpoint: Endpoint::Proxy {
                base_url: proxy_url.trim_end_matches('/').to_string(),
            },
            http: Client::new(),
        }
    }

    /// Overrides the NewsAPI host. Has no effect on a proxied client.
    pub fn with_base_url(mut self, url: &str) -> Self {
        if let Endpoint::Direct { base_url, .. } = &mut self.endpoint {
            *base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    fn request(&self, place: &str) -> reqwest::RequestBuilder {
        match &self.endpoint {
            Endpoint::Direct { base_url, api_key } => self
                .http
                .get(format!("{base_url}/v2/everything"))
                .query(&[
                    ("q", place),
                    ("sortBy", "publishedAt"),
                    ("pageSize", "3"),
                    ("language", "en"),
                    ("apiKey", api_key.as_str()),
                ]),
            Endpoint::Proxy { base_url } => self
                .http
                .get(format!("{base_url}/api/news"))
                .query(&[("q", place)]),
        }
    }

    async fn fetch_articles(&self, place: &str) -> Result<Vec<ContentItem>, FetchError> {
        let res = self
            .request(place)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;

        tracing::debug!(%status, proxied = matches!(self.endpoint, Endpoint::Proxy { .. }), "news response");

        if !status.is_success() {
            tracing::warn!(%status, body = %body, "news request failed");
            return Err(FetchError::from_status(PROVIDER, status, &body));
        }

        let parsed: NewsResponse = serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        Ok(parsed
            .articles
            .into_iter()
            .filter(|a| a.title.as_deref() != Some(REMOVED))
            .take(MAX_ITEMS)
            .map(Article::into_item)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Default, Deserialize)]
struct Source {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(default)]
    source: Source,
    published_at: Option<String>,
}

impl Article {
    fn into_item(self) -> ContentItem {
        let published_at = self
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        ContentItem {
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            description: self
                .description
                .unwrap_or_else(|| "No description available.".to_string()),
            source: self.source.name.unwrap_or_else(|| "Unknown source".to_string()),
            label: published_at.map(format_date).unwrap_or_default(),
            url: self.url,
            published_at,
        }
    }
}

#[async_trait]
impl ContentProvider for NewsApiClient {
    async fn for_place(&self, query: &SearchQuery) -> Result<Vec<ContentItem>, FetchError> {
        self.fetch_articles(query.as_str()).await
    }
}
