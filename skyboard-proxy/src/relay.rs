use axum::{
    extract::{Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{AppState, error::RelayError};

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    pub q: Option<String>,
}

/// `GET /api/news?q=`: forward to NewsAPI with the server-held key.
pub async fn news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Result<Response, RelayError> {
    let q = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or(RelayError::MissingQuery)?;

    let upstream = state
        .http
        .get(format!("{}/v2/everything", state.config.news_base_url))
        .query(&[
            ("q", q.as_str()),
            ("sortBy", "publishedAt"),
            ("pageSize", "3"),
            ("language", "en"),
            ("apiKey", state.config.news_api_key.as_str()),
        ])
        .send()
        .await
        .map_err(|e| {
            let e = e.without_url();
            tracing::error!(error = %e, "news upstream unreachable");
            RelayError::Transport(e)
        })?;

    let status = upstream.status();
    let body = upstream.bytes().await.map_err(|e| {
        let e = e.without_url();
        tracing::error!(error = %e, "failed to read news upstream body");
        RelayError::Transport(e)
    })?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&body).into_owned();
        tracing::error!(%status, body = %body, "news upstream error");
        return Err(RelayError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    tracing::debug!(%status, bytes = body.len(), "relaying news response");

    let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK);
    Ok((status, [(CONTENT_TYPE, "application/json")], body).into_response())
}
