//! # imdb-client
//!
//! Client for an IMDb-like lookup API, split into two stateless stages:
//!
//! 1. **Search**: `GET <api>/?q=<query>` returns candidate titles, projected
//!    into inline photo cards (records without a poster are dropped).
//! 2. **Detail**: `GET <api>/?tt=<title id>` returns one large document,
//!    rendered into a single HTML caption for Telegram.
//!
//! ## Configuration (env vars)
//!
//! | Variable | Required | Description |
//! |---|---|---|
//! | `IMDB_API_URL` | yes | Base URL of the lookup API; when absent both stages short-circuit |
//! | `IMDB_DEFAULT_NO_IMG_URL` | no | Thumbnail used for every card instead of the poster |
//! | `BROWSER_USER_AGENT` | no | `User-Agent` sent with every request |

pub mod caption;
mod client;
pub mod config;
mod detail;
pub mod env;
mod error;
mod search;

pub use caption::{RenderedCaption, render_caption};
pub use client::ImdbClient;
pub use config::ImdbConfig;
pub use error::ImdbError;
pub use search::{SearchPage, SearchStatus, project_search};

pub type Result<T> = std::result::Result<T, ImdbError>;

/// Text returned by both stages when `IMDB_API_URL` is not configured.
pub const NOT_CONFIGURED_NOTICE: &str = "IMDB_API_URL not set!";
