use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Network, TLS, or timeout failure while fetching a page.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid catalog URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A single product card could not be read; the card is skipped.
    #[error("malformed product card #{index}: {reason}")]
    MalformedProduct { index: usize, reason: String },
}

impl ScraperError {
    /// Returns `true` for errors raised while loading a page, as opposed to
    /// errors raised while reading a single card on an already-loaded page.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        !matches!(self, ScraperError::MalformedProduct { .. })
    }
}
