//! Scraping pipeline pieces: source configuration, HTTP fetching,
//! listing extraction, and text normalization.

mod config;
mod http_client;
mod listing;
pub mod normalize;

pub use config::SourceConfig;
pub use http_client::HttpClient;
pub use listing::fetch_listing;

use thiserror::Error;

/// Transport- or markup-level scraping failure.
///
/// Item-level malformation never produces one of these; malformed
/// listing items are skipped at extraction time.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

/// An unvalidated, unnormalized listing item extracted from a source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub name: String,
    pub date_text: String,
    pub location_text: String,
}
