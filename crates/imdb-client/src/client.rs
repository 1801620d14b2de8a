use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ImdbConfig;

/// Client for the search and detail endpoints.
///
/// Holds no per-request state; one instance is shared by every handler.
pub struct ImdbClient {
    http: Client,
    config: ImdbConfig,
}

impl ImdbClient {
    /// Create a client with a default reqwest `Client`.
    pub fn new(config: ImdbConfig) -> crate::Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client around an existing reqwest `Client`.
    pub fn with_client(http: Client, config: ImdbConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ImdbConfig {
        &self.config
    }

    /// GET `endpoint` with a single query parameter and parse the body as JSON.
    ///
    /// The body is parsed even on a non-success status; a non-JSON body
    /// surfaces as [`ImdbError::Parse`](crate::ImdbError::Parse).
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Url,
        key: &str,
        value: &str,
    ) -> crate::Result<T> {
        let mut request = self.http.get(endpoint).query(&[(key, value)]);
        if let Some(user_agent) = &self.config.user_agent {
            request = request.header(USER_AGENT, user_agent);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, key, value, "Lookup API returned a non-success status");
        }

        let body = response.text().await?;
        debug!(key, value, bytes = body.len(), "Lookup API responded");

        Ok(serde_json::from_str(body.trim())?)
    }
}
