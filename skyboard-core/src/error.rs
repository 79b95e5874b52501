use thiserror::Error;

/// Rejected before any provider is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter a city name.")]
    EmptyQuery,
}

/// Failure of a single outbound provider call.
///
/// The `Display` text is what the dashboard shows to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("City not found. Please check the spelling and try again.")]
    NotFound,

    #[error("Invalid API key. Please check your {provider} API key.")]
    Unauthorized { provider: &'static str },

    #[error("Too many requests to {provider}. Please wait a moment and try again.")]
    RateLimited { provider: &'static str },

    #[error("Network error. Please check your internet connection.")]
    Network(#[source] reqwest::Error),

    #[error("Unable to fetch data from {provider}. Status: {status}. Response: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {provider}: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl FetchError {
    /// Map a non-success status that has no provider-specific meaning.
    pub fn from_status(provider: &'static str, status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => FetchError::Unauthorized { provider },
            429 => FetchError::RateLimited { provider },
            code => FetchError::Provider {
                provider,
                status: code,
                body: truncate_body(body),
            },
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
