use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::{
    error::FetchError,
    model::{ContentItem, SearchQuery},
};

use super::{ContentProvider, format_date};

/// Canned local headlines for the offline variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNewsProvider;

/// (title template, description template, source, age in hours)
const HEADLINES: &[(&str, &str, &str, i64)] = &[
    (
        "{city} Prepares for a Busy Weekend of Events",
        "Organisers in {city} expect record crowds as festivals and markets open across the city.",
        "City Desk",
        3,
    ),
    (
        "Local Businesses in {city} Report a Strong Quarter",
        "Shop owners across {city} say foot traffic is up compared to last year.",
        "Business Wire",
        27,
    ),
    (
        "{city} Transit Upgrades Move Ahead",
        "Planned improvements to the {city} transit network passed another council vote.",
        "Metro Journal",
        74,
    ),
];

#[async_trait]
impl ContentProvider for OfflineNewsProvider {
    async fn for_place(&self, query: &SearchQuery) -> Result<Vec<ContentItem>, FetchError> {
        let now = Utc::now();
        let city = query.as_str();

        Ok(HEADLINES
            .iter()
            .map(|(title, description, source, age)| {
                let published_at = now - Duration::hours(*age);
                ContentItem {
                    title: title.replace("{city}", city),
                    description: description.replace("{city}", city),
                    source: source.to_string(),
                    label: format_date(published_at),
                    url: None,
                    published_at: Some(published_at),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn three_articles_about_the_city_newest_first() {
        let items = OfflineNewsProvider
            .for_place(&SearchQuery::parse("Madrid").unwrap())
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.title.contains("Madrid")));
        assert!(items.windows(2).all(|w| w[0].published_at > w[1].published_at));
    }
}
