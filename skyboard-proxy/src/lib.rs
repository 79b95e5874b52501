//! News relay for the skyboard dashboard.
//!
//! Serves the static client at `/` and forwards `GET /api/news?q=` to
//! NewsAPI with a server-held key, so the key never reaches the browser and
//! the browser never makes a cross-origin news request.

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod relay;

pub use config::ProxyConfig;
pub use error::RelayError;

/// Shared across handlers. Holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

/// Build the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/api/news", get(relay::news))
        .route("/health", get(health_check))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ProxyConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr;
    tracing::info!(static_dir = %config.static_dir.display(), "serving static assets");

    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Proxy server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
