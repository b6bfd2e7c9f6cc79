//! Text parsers for individual scraped fields.
//!
//! Each parser takes the raw field text and returns `None` when no usable
//! value is present. Mapping a `None` to a [`crate::RejectReason`] is the
//! caller's job.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static USD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d[\d,]*(?:\.\d+)?)").expect("valid price regex"));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid number regex"));
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid integer regex"));

/// Parses the dollar amount out of a price string such as `"$10.00"` or
/// `"$1,299.50"`. Thousands separators are ignored.
#[must_use]
pub fn parse_usd_amount(text: &str) -> Option<Decimal> {
    let caps = USD_RE.captures(text)?;
    let digits: String = caps[1].chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&digits).ok()
}

/// Parses the rating value out of text such as `"Rating: ⭐ 4.5 / 5"`.
///
/// Returns the first numeric token that is not the scale written after a
/// `/`, so `"⭐ Invalid Rating / 5"` yields `None` rather than `5`.
#[must_use]
pub fn parse_rating_value(text: &str) -> Option<Decimal> {
    NUMBER_RE
        .find_iter(text)
        .find(|m| !text[..m.start()].trim_end().ends_with('/'))
        .and_then(|m| Decimal::from_str(m.as_str()).ok())
}

/// Parses the first integer in text such as `"3 Colors"`.
#[must_use]
pub fn parse_count(text: &str) -> Option<u32> {
    INTEGER_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Removes a leading `label` (e.g. `"Size:"`) and surrounding whitespace.
///
/// Text without the label is kept as-is after trimming. Returns `None` when
/// nothing is left.
#[must_use]
pub fn strip_label<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = text.trim();
    let value = trimmed.strip_prefix(label).unwrap_or(trimmed).trim();
    (!value.is_empty()).then_some(value)
}
