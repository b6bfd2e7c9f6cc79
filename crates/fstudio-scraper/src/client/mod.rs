//! HTTP client for the paginated product catalog.

mod extract;

use std::time::Duration;

use rand::Rng;
use reqwest::Client;

use crate::error::ScraperError;

pub use extract::{Extraction, StopReason};

/// Hard ceiling on pages fetched in one run, applied even when no page limit
/// is configured. Prevents endless loops on a `Next` link that cycles.
pub(crate) const MAX_PAGES: usize = 1_000;

/// HTTP client for the catalog's HTML listing pages.
///
/// Pages are fetched one at a time. Between pages the client sleeps for
/// `inter_request_delay_ms` plus a random `0..=delay_jitter_ms`.
pub struct CatalogClient {
    client: Client,
    inter_request_delay_ms: u64,
    delay_jitter_ms: u64,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with a per-request timeout and `User-Agent`.
    /// No delay is applied between pages until [`Self::with_page_delay`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            inter_request_delay_ms: 0,
            delay_jitter_ms: 0,
        })
    }

    /// Sets the polite delay applied between consecutive page fetches.
    #[must_use]
    pub fn with_page_delay(mut self, inter_request_delay_ms: u64, delay_jitter_ms: u64) -> Self {
        self.inter_request_delay_ms = inter_request_delay_ms;
        self.delay_jitter_ms = delay_jitter_ms;
        self
    }

    /// Fetches one listing page and returns its HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] — `url` is not an absolute URL.
    /// - [`ScraperError::NotFound`] — HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network, TLS, or timeout failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    fn next_delay(&self) -> Duration {
        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };
        Duration::from_millis(self.inter_request_delay_ms.saturating_add(jitter))
    }
}
