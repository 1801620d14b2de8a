//! Inline result id protocol

use serde::{Deserialize, Serialize};
use std::fmt;

const TAG: &str = "f";
const TOKEN_COUNT: usize = 4;

/// Identifier attached to every inline result card.
///
/// Format: `f {seq} {offset} {title_id}`
///
/// Examples:
/// - First card of the first page: `f 0 0 tt0133093`
/// - Fourth card: `f 3 0 tt0234215`
///
/// The chosen-result handler only acts on ids that split into exactly
/// four space-separated tokens; the last token is the title id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    /// Build the id for the `seq`-th record of a search response.
    pub fn new(seq: usize, offset: u32, title_id: &str) -> Self {
        Self(format!("{} {} {} {}", TAG, seq, offset, title_id))
    }

    /// Parse an id received from a chosen inline result.
    ///
    /// Returns `None` unless the id has exactly four tokens and starts
    /// with the `f` tag.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split(' ').collect();
        if parts.len() != TOKEN_COUNT || parts[0] != TAG || parts[3].is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// Get the underlying string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position of the record inside its search response
    pub fn seq(&self) -> Option<usize> {
        self.token(1).and_then(|t| t.parse().ok())
    }

    /// Paging offset the result was produced for
    pub fn offset(&self) -> Option<u32> {
        self.token(2).and_then(|t| t.parse().ok())
    }

    /// External title id (e.g. `tt0133093`)
    pub fn title_id(&self) -> &str {
        self.token(3).unwrap_or_default()
    }

    fn token(&self, index: usize) -> Option<&str> {
        self.0.split(' ').nth(index)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ResultId> for String {
    fn from(id: ResultId) -> String {
        id.0
    }
}

impl AsRef<str> for ResultId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
