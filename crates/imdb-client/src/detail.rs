//! Detail stage: title id → HTML caption

use imdb_types::DetailDocument;
use tracing::{debug, info, warn};

use crate::caption::{RenderedCaption, render_caption};
use crate::{ImdbClient, NOT_CONFIGURED_NOTICE};

impl ImdbClient {
    /// Fetch the detail document for `title_id` and render its caption.
    ///
    /// Without a configured endpoint no request is made and the caption is
    /// the plain not-configured notice.
    pub async fn detail(&self, title_id: &str) -> crate::Result<RenderedCaption> {
        let Some(endpoint) = self.config().endpoint()? else {
            warn!("Detail skipped: IMDB_API_URL is not configured");
            return Ok(RenderedCaption::new(NOT_CONFIGURED_NOTICE));
        };

        debug!(title_id, "Fetching title detail");
        let doc: DetailDocument = self.fetch_json(endpoint, "tt", title_id).await?;

        let caption = render_caption(&doc, title_id);
        info!(title_id, len = caption.html.len(), "Detail rendered");
        Ok(caption)
    }
}
