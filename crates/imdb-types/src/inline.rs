//! Transport-neutral inline result card

use serde::{Deserialize, Serialize};

use crate::result_id::ResultId;

/// URL button attached below a result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkButton {
    pub text: String,
    pub url: String,
}

/// Photo card built from one search record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineResultItem {
    pub id: ResultId,
    pub photo_url: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_height: Option<u32>,
    pub title: String,
    pub description: String,
    pub button: LinkButton,
}
