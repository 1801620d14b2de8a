//! Search stage: query → inline result cards

use imdb_types::{InlineResultItem, LinkButton, ResultId, SearchApiResponse};
use tracing::{debug, info, warn};
use url::Url;

use crate::{ImdbClient, NOT_CONFIGURED_NOTICE};

/// Whether the search actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Ok,
    /// `IMDB_API_URL` is missing; no request was made
    NotConfigured,
}

/// One page of inline results plus the status line shown above them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<InlineResultItem>,
    /// Always `None`: the endpoint returns a single page
    pub next_offset: Option<String>,
    pub notice: String,
    pub status: SearchStatus,
}

impl SearchPage {
    fn not_configured() -> Self {
        Self {
            items: Vec::new(),
            next_offset: None,
            notice: NOT_CONFIGURED_NOTICE.to_string(),
            status: SearchStatus::NotConfigured,
        }
    }
}

impl ImdbClient {
    /// Search titles matching `query`.
    ///
    /// `offset` is embedded in every result id; `limit` is advisory and the
    /// endpoint's single page is returned as-is.
    pub async fn search(&self, query: &str, offset: u32, limit: u32) -> crate::Result<SearchPage> {
        let Some(endpoint) = self.config().endpoint()? else {
            warn!("Search skipped: IMDB_API_URL is not configured");
            return Ok(SearchPage::not_configured());
        };

        debug!(query, offset, limit, "Searching titles");
        let response: SearchApiResponse = self.fetch_json(endpoint, "q", query).await?;
        if !response.ok {
            warn!(error_code = ?response.error_code, query, "Search API reported failure");
        }

        let page = project_search(
            response,
            query,
            offset,
            self.config().no_image_url.as_deref(),
        );
        info!(query, kept = page.items.len(), "Search complete");
        Ok(page)
    }
}

/// Project a search response into result cards.
///
/// Records are dropped when their poster is missing or not an http(s) URL,
/// or when their title id is blank or contains whitespace. The sequence
/// number in each id is the record's position in the full response, so
/// dropped records still consume an index.
pub fn project_search(
    response: SearchApiResponse,
    query: &str,
    offset: u32,
    no_image_url: Option<&str>,
) -> SearchPage {
    let total = response.description.len();
    let no_image_url = no_image_url.map(str::trim).filter(|url| {
        let valid = is_http_url(url);
        if !valid {
            warn!(no_image_url = %url, "Ignoring invalid no-image URL");
        }
        valid
    });

    let items: Vec<InlineResultItem> = response
        .description
        .iter()
        .enumerate()
        .filter_map(|(seq, record)| {
            let poster = record.poster().filter(|poster| is_http_url(poster))?;
            if !is_title_id(&record.imdb_id) {
                warn!(seq, imdb_id = %record.imdb_id, "Dropping record with unusable title id");
                return None;
            }
            let title = record.display_title();
            Some(InlineResultItem {
                id: ResultId::new(seq, offset, &record.imdb_id),
                photo_url: poster.to_string(),
                thumbnail_url: no_image_url.unwrap_or(poster).to_string(),
                photo_width: record.photo_width,
                photo_height: record.photo_height,
                description: record.summary(),
                button: LinkButton {
                    text: title.clone(),
                    url: record.imdb_iv.clone(),
                },
                title,
            })
        })
        .collect();

    let notice = format!("Found {} / {} Results for '{}'", items.len(), total, query);

    SearchPage {
        items,
        next_offset: None,
        notice,
        status: SearchStatus::Ok,
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Title ids travel as the last token of a space-separated result id.
fn is_title_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(char::is_whitespace)
}
