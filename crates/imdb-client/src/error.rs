use thiserror::Error;

/// Errors raised while talking to the lookup API.
///
/// A missing `IMDB_API_URL` is not an error: both stages degrade to a
/// notice instead.
#[derive(Debug, Error)]
pub enum ImdbError {
    /// Network-level failure (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not the expected JSON
    #[error("Failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),

    /// `IMDB_API_URL` is set but is not a usable URL
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
