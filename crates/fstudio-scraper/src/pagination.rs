//! Page-number URLs and `Next`-link resolution for the catalog listing.
//!
//! The catalog serves page 1 at its root and later pages at `/page{n}`:
//!
//! ```text
//! https://fashion-studio.dicoding.dev
//! https://fashion-studio.dicoding.dev/page2
//! https://fashion-studio.dicoding.dev/page3
//! ```
//!
//! Each page also renders a `Next` link inside its pagination bar. When
//! present it takes precedence over the computed page-number URL.

use reqwest::Url;

/// Builds the URL of listing page `page` (1-based) under `base_url`.
#[must_use]
pub fn page_url(base_url: &str, page: usize) -> String {
    if page <= 1 {
        return base_url.to_owned();
    }
    format!("{}/page{page}", base_url.trim_end_matches('/'))
}

/// Resolves a pagination `href` against the URL of the page it appeared on.
///
/// Absolute hrefs are returned as-is; root-relative and path-relative hrefs
/// are joined onto `current_url`. Returns `None` for empty hrefs, fragment
/// links, or when `current_url` is not a valid absolute URL.
#[must_use]
pub fn resolve_href(current_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let base = Url::parse(current_url).ok()?;
    base.join(href).ok().map(String::from)
}
