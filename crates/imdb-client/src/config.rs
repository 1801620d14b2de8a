use serde::{Deserialize, Serialize};
use url::Url;

use crate::ImdbError;
use crate::env::ReadEnv;

/// Configuration for the lookup API.
///
/// Resolved from environment variables:
/// - `IMDB_API_URL`: base URL of the search/detail API (required for lookups)
/// - `IMDB_DEFAULT_NO_IMG_URL`: thumbnail used for every result card (optional)
/// - `BROWSER_USER_AGENT`: `User-Agent` header for outbound requests (optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImdbConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ImdbConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            ..Default::default()
        }
    }

    pub fn from_env<E: ReadEnv>(env: &E) -> Self {
        Self {
            api_url: env.non_blank("IMDB_API_URL"),
            no_image_url: env.non_blank("IMDB_DEFAULT_NO_IMG_URL"),
            user_agent: env.non_blank("BROWSER_USER_AGENT"),
        }
    }

    pub fn with_no_image_url(mut self, url: impl Into<String>) -> Self {
        self.no_image_url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Whether a non-blank API URL is present.
    pub fn is_configured(&self) -> bool {
        self.api_url().is_some()
    }

    fn api_url(&self) -> Option<&str> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// API base URL with its path ending in exactly one `/`.
    ///
    /// Returns `Ok(None)` when the API is not configured.
    pub fn endpoint(&self) -> crate::Result<Option<Url>> {
        let Some(raw) = self.api_url() else {
            return Ok(None);
        };

        let mut url = Url::parse(raw).map_err(|e| ImdbError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ImdbError::InvalidUrl {
                url: raw.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }

        let path = format!("{}/", url.path().trim_end_matches('/'));
        url.set_path(&path);
        Ok(Some(url))
    }
}
