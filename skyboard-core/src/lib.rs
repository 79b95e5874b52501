//! Core library for the `skyboard` dashboard.
//!
//! This crate defines:
//! - The dashboard controller and its display state machine
//! - Weather providers (live OpenWeatherMap, offline synthesised)
//! - Secondary content (NewsAPI, canned offline news, music recommendations)
//! - Static icon and recommendation tables
//! - Configuration & credentials handling
//!
//! It is used by `skyboard-cli`, but any other presentation layer can drive a
//! [`Dashboard`] through its own [`DisplaySurface`].

pub mod config;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::{Config, NewsConfig, ProviderConfig, Variant};
pub use content::{ContentProvider, ContentSource};
pub use dashboard::{Dashboard, DisplaySurface, UiState, View, render};
pub use error::{FetchError, SearchError};
pub use model::{Condition, ContentItem, DisplayState, SearchOutcome, SearchQuery, WeatherReading};
pub use provider::{ProviderId, WeatherProvider};
