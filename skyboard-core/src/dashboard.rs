//! The dashboard controller.
//!
//! A [`Dashboard`] owns the [`UiState`] for one screen. Each search walks the
//! display through `Idle -> Loading -> Success | Error`, and every transition
//! is pushed to a [`DisplaySurface`]. Turning state into text is done by the
//! pure [`render`] function so that surfaces stay dumb.

use chrono::{Local, Timelike};

use crate::{
    Config, Variant,
    content::{ContentSource, content_source_for},
    error::FetchError,
    lookup::{MAX_ITEMS, icon_for, recommend_music},
    model::{DisplayState, SearchOutcome, SearchQuery},
    provider::{WeatherProvider, weather_provider_for},
};

/// Predefined shortcut cities.
pub const QUICK_CITIES: &[&str] = &["London", "New York", "Tokyo", "Paris", "Sydney"];

/// Receives every state transition of a dashboard.
pub trait DisplaySurface {
    fn show(&mut self, ui: &UiState);
}

/// The query field plus what is currently displayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub query: String,
    pub display: DisplayState,
}

type HourOfDay = Box<dyn Fn() -> u32 + Send + Sync>;

pub struct Dashboard<S> {
    weather: Box<dyn WeatherProvider>,
    content: ContentSource,
    surface: S,
    ui: UiState,
    hour_of_day: HourOfDay,
}

impl<S: DisplaySurface> Dashboard<S> {
    pub fn new(weather: Box<dyn WeatherProvider>, content: ContentSource, surface: S) -> Self {
        Self {
            weather,
            content,
            surface,
            ui: UiState::default(),
            hour_of_day: Box::new(|| Local::now().hour()),
        }
    }

    /// Build the providers for `variant` from `config`.
    pub fn from_config(variant: Variant, config: &Config, surface: S) -> anyhow::Result<Self> {
        let weather = weather_provider_for(variant, config)?;
        let content = content_source_for(variant, config)?;
        tracing::debug!(%variant, "dashboard configured");
        Ok(Self::new(weather, content, surface))
    }

    /// Replace the local clock used for time-of-day recommendations.
    pub fn with_hour_of_day(mut self, hour: impl Fn() -> u32 + Send + Sync + 'static) -> Self {
        self.hour_of_day = Box::new(hour);
        self
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.ui.query = query.into();
    }

    /// Same as typing `city` into the query field and searching.
    pub async fn quick_select(&mut self, city: &str) {
        self.set_query(city);
        self.handle_search().await;
    }

    /// Search for whatever is in the query field.
    ///
    /// Always settles in either `Success` or `Error`; `Loading` is entered at
    /// most once and is always left. If the returned future is dropped while
    /// loading, the display goes back to `Idle`.
    pub async fn handle_search(&mut self) {
        self.transition(DisplayState::Idle);

        let query = match SearchQuery::parse(&self.ui.query) {
            Ok(query) => query,
            Err(err) => {
                self.transition(DisplayState::Error(err.to_string()));
                return;
            }
        };

        let guard = LoadingGuard::enter(self);

        let settled = match guard.dashboard.search(&query).await {
            Ok(outcome) => {
                tracing::info!(place = %outcome.reading.place, items = outcome.items.len(), "search succeeded");
                DisplayState::Success(Box::new(outcome))
            }
            Err(err) => {
                tracing::warn!(%query, error = %err, "search failed");
                DisplayState::Error(err.to_string())
            }
        };

        guard.settle(settled);
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, FetchError> {
        let (reading, mut items) = match &self.content {
            ContentSource::Place {
                provider,
                required: true,
            } => tokio::try_join!(self.weather.current(query), provider.for_place(query))?,
            ContentSource::Place {
                provider,
                required: false,
            } => {
                let (weather, content) =
                    tokio::join!(self.weather.current(query), provider.for_place(query));
                let items = content.unwrap_or_else(|err| {
                    tracing::warn!(%query, error = %err, "secondary content unavailable");
                    Vec::new()
                });
                (weather?, items)
            }
            ContentSource::Music => {
                let reading = self.weather.current(query).await?;
                let items =
                    recommend_music(&reading.condition, reading.temperature_c, (self.hour_of_day)());
                (reading, items)
            }
        };

        items.truncate(MAX_ITEMS);
        let icon = icon_for(&reading.icon_code, reading.condition.as_str());

        Ok(SearchOutcome {
            reading,
            icon,
            items,
        })
    }

    fn transition(&mut self, display: DisplayState) {
        self.ui.display = display;
        self.surface.show(&self.ui);
    }
}

/// Holds a dashboard in `Loading`; if dropped before [`LoadingGuard::settle`]
/// (the search future was cancelled) it moves the display back to `Idle`.
struct LoadingGuard<'a, S: DisplaySurface> {
    dashboard: &'a mut Dashboard<S>,
    settled: bool,
}

impl<'a, S: DisplaySurface> LoadingGuard<'a, S> {
    fn enter(dashboard: &'a mut Dashboard<S>) -> Self {
        dashboard.transition(DisplayState::Loading);
        Self {
            dashboard,
            settled: false,
        }
    }

    fn settle(mut self, display: DisplayState) {
        self.settled = true;
        self.dashboard.transition(display);
    }
}

impl<S: DisplaySurface> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!(query = %self.dashboard.ui.query, "search cancelled while loading");
            self.dashboard.transition(DisplayState::Idle);
        }
    }
}

/// Display-ready strings for the weather card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub place: String,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCard {
    pub title: String,
    pub description: String,
    pub source: String,
    pub label: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Idle,
    Loading,
    Results {
        weather: WeatherCard,
        content: Vec<ContentCard>,
    },
    Error(String),
}

pub fn render(ui: &UiState) -> View {
    match &ui.display {
        DisplayState::Idle => View::Idle,
        DisplayState::Loading => View::Loading,
        DisplayState::Error(message) => View::Error(message.clone()),
        DisplayState::Success(outcome) => {
            let r = &outcome.reading;
            View::Results {
                weather: WeatherCard {
                    place: r.place.clone(),
                    description: r.description.clone(),
                    temperature: format!("{}°C", whole(r.temperature_c)),
                    feels_like: format!("{}°C", whole(r.feels_like_c)),
                    humidity: format!("{}%", r.humidity_pct),
                    wind: format!("{} km/h", whole(r.wind_speed_kmh)),
                    icon: outcome.icon,
                },
                content: outcome
                    .items
                    .iter()
                    .map(|item| ContentCard {
                        title: item.title.clone(),
                        description: item.description.clone(),
                        source: item.source.clone(),
                        label: item.label.clone(),
                        url: item.url.clone(),
                    })
                    .collect(),
            }
        }
    }
}

/// Rounds to the nearest integer with halves going up (-2.5 -> -2); never
/// yields "-0".
fn whole(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
