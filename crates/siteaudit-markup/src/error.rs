use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Failures retrieving a page for structural analysis.
///
/// Malformed markup is never an error; the analyzer returns whatever it
/// could extract.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}
