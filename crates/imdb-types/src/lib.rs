//! Shared types for the IMDb inline bot
//!
//! This crate holds the payloads exchanged with the IMDb lookup API
//! (search records and the detail document), the transport-neutral
//! inline result card, and the composite result id that carries a
//! title id from an inline result to the chosen-result handler.

pub mod detail;
pub mod inline;
pub mod result_id;
pub mod search;

pub use detail::DetailDocument;
pub use inline::{InlineResultItem, LinkButton};
pub use result_id::ResultId;
pub use search::{SearchApiResponse, SearchRecord};
