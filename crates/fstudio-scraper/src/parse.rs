//! Product-card extraction from a catalog listing page.
//!
//! A listing page renders each product as:
//!
//! ```html
//! <div class="collection-card">
//!   <div class="product-details">
//!     <h3 class="product-title">T-shirt 2</h3>
//!     <div class="price-container"><span class="price">$102.15</span></div>
//!     <p>Rating: ⭐ 3.9 / 5</p>
//!     <p>3 Colors</p>
//!     <p>Size: M</p>
//!     <p>Gender: Women</p>
//!   </div>
//! </div>
//! ```
//!
//! Fields are kept as raw text. Normalization belongs to the transformer.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use fstudio_core::{RawRecord, UNKNOWN_PRODUCT_TITLE};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::pagination::resolve_href;

const PRICE_UNAVAILABLE: &str = "Price Unavailable";

static CARD: LazyLock<Selector> = LazyLock::new(|| selector("div.collection-card"));
static DETAILS: LazyLock<Selector> = LazyLock::new(|| selector("div.product-details"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h3.product-title"));
static PRICE_CANDIDATES: LazyLock<Selector> = LazyLock::new(|| selector("span, p"));
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static PAGE_LINKS: LazyLock<Selector> = LazyLock::new(|| selector("a.page-link"));

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\d+\.\d+").expect("valid price regex"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

/// Everything read from one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub records: Vec<RawRecord>,
    /// Number of product containers on the page, including skipped ones.
    pub container_count: usize,
    /// Containers that could not be read at all.
    pub skipped: usize,
    /// Absolute URL of the page's `Next` link, if it has one.
    pub next_url: Option<String>,
}

/// Parses a listing page fetched from `page_url`.
///
/// Every record on the page shares `extracted_at`. Cards without a
/// `product-details` block are logged and skipped; cards with missing fields
/// still produce a record with those fields set to `None`.
#[must_use]
pub fn parse_page(html: &str, page_url: &str, extracted_at: DateTime<Utc>) -> ParsedPage {
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    let mut container_count = 0usize;
    let mut skipped = 0usize;

    for (index, card) in document.select(&CARD).enumerate() {
        container_count += 1;
        match parse_card(card, index, extracted_at) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::debug!(page_url, error = %e, "skipping product card");
            }
        }
    }

    ParsedPage {
        records,
        container_count,
        skipped,
        next_url: next_page_link(&document, page_url),
    }
}

fn parse_card(
    card: ElementRef<'_>,
    index: usize,
    extracted_at: DateTime<Utc>,
) -> Result<RawRecord, ScraperError> {
    let details = card
        .select(&DETAILS)
        .next()
        .ok_or_else(|| ScraperError::MalformedProduct {
            index,
            reason: "no product-details block".into(),
        })?;

    let title = details
        .select(&TITLE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_PRODUCT_TITLE.to_owned());

    let paragraphs: Vec<String> = details.select(&PARAGRAPHS).map(element_text).collect();

    Ok(RawRecord {
        title,
        price: extract_price(details),
        rating: first_matching(&paragraphs, |p| p.contains("Rating:")),
        colors: first_matching(&paragraphs, |p| p.contains("Colors") && !p.contains("Rating")),
        size: first_matching(&paragraphs, |p| p.contains("Size:")),
        gender: first_matching(&paragraphs, |p| p.contains("Gender:")),
        extracted_at,
    })
}

fn first_matching(paragraphs: &[String], pred: impl Fn(&str) -> bool) -> Option<String> {
    paragraphs.iter().find(|p| pred(p.as_str())).cloned()
}

/// Reads the price text. The catalog renders `Price Unavailable` verbatim for
/// unpriced items; that text is kept so the transformer can reject it.
fn extract_price(details: ElementRef<'_>) -> Option<String> {
    if details.text().any(|t| t.trim() == PRICE_UNAVAILABLE) {
        return Some(PRICE_UNAVAILABLE.to_owned());
    }
    details
        .select(&PRICE_CANDIDATES)
        .map(element_text)
        .find(|t| PRICE_RE.is_match(t))
}

fn next_page_link(document: &Html, page_url: &str) -> Option<String> {
    document
        .select(&PAGE_LINKS)
        .find(|a| element_text(*a) == "Next")
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_href(page_url, href))
}

/// Concatenated text of an element with whitespace runs collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
