//! Page-by-page extraction loop for `CatalogClient`.

use chrono::{SubsecRound, Utc};
use fstudio_core::RawRecord;

use crate::error::ScraperError;
use crate::pagination::page_url;
use crate::parse::parse_page;

use super::{CatalogClient, MAX_PAGES};

/// Why pagination ended.
#[derive(Debug)]
pub enum StopReason {
    /// The page at this number had no product containers.
    EmptyPage { page: usize },
    /// The configured page limit (or [`MAX_PAGES`]) was reached.
    PageLimit { limit: usize },
    /// The page at this number could not be fetched. Earlier records are kept.
    FetchFailed { page: usize, error: ScraperError },
}

/// Records collected by one extraction run and how the run ended.
#[derive(Debug)]
pub struct Extraction {
    pub records: Vec<RawRecord>,
    /// Pages whose body was successfully fetched, including the final empty one.
    pub pages_fetched: usize,
    /// Product cards skipped because they could not be read.
    pub skipped_products: usize,
    pub stop: StopReason,
}

impl CatalogClient {
    /// Walks the catalog from `base_url` and returns every product card found.
    ///
    /// Never fails: a page that cannot be fetched ends pagination and the
    /// records gathered so far are returned. See [`Self::extract_with_report`]
    /// for the stop reason and page counts.
    pub async fn extract(&self, base_url: &str, max_pages: Option<usize>) -> Vec<RawRecord> {
        self.extract_with_report(base_url, max_pages).await.records
    }

    /// Walks the catalog starting at page 1 (`base_url`), following each
    /// page's `Next` link or, when it has none, the next `/page{n}` URL.
    ///
    /// Stops at the first page with zero product containers, the first fetch
    /// failure, or after `max_pages` pages. The polite delay is applied before
    /// every page except the first.
    pub async fn extract_with_report(&self, base_url: &str, max_pages: Option<usize>) -> Extraction {
        let limit = max_pages.map_or(MAX_PAGES, |m| m.min(MAX_PAGES));
        let mut records: Vec<RawRecord> = Vec::new();
        let mut pages_fetched = 0usize;
        let mut skipped_products = 0usize;
        let mut url = page_url(base_url, 1);
        let mut page = 1usize;

        let stop = loop {
            if page > limit {
                tracing::info!(limit, "page limit reached");
                break StopReason::PageLimit { limit };
            }

            if page > 1 {
                tokio::time::sleep(self.next_delay()).await;
            }

            tracing::info!(page, url = %url, "fetching catalog page");
            let html = match self.fetch_page(&url).await {
                Ok(html) => html,
                Err(error) => {
                    tracing::warn!(page, url = %url, error = %error, "page fetch failed, stopping pagination");
                    break StopReason::FetchFailed { page, error };
                }
            };
            pages_fetched += 1;

            let extracted_at = Utc::now().trunc_subsecs(0);
            let parsed = parse_page(&html, &url, extracted_at);

            if parsed.container_count == 0 {
                tracing::info!(page, "no products on page, stopping");
                break StopReason::EmptyPage { page };
            }

            tracing::info!(
                page,
                count = parsed.records.len(),
                skipped = parsed.skipped,
                "products found on page"
            );
            skipped_products += parsed.skipped;
            records.extend(parsed.records);

            page += 1;
            url = parsed
                .next_url
                .unwrap_or_else(|| page_url(base_url, page));
        };

        tracing::info!(
            total = records.len(),
            pages_fetched,
            skipped_products,
            "extraction finished"
        );

        Extraction {
            records,
            pages_fetched,
            skipped_products,
            stop,
        }
    }
}
