use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product card as scraped, before any cleanup.
///
/// Fields other than `title` are `None` when the card did not carry them;
/// validation happens downstream in the transformer. A card with no title
/// element gets [`crate::UNKNOWN_PRODUCT_TITLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: String,
    /// Price text with its currency symbol, e.g. `"$10.00"` or `"Price Unavailable"`.
    pub price: Option<String>,
    /// Rating text, e.g. `"Rating: ⭐ 4.5 / 5"`.
    pub rating: Option<String>,
    /// Colour count text, e.g. `"3 Colors"`.
    pub colors: Option<String>,
    /// Labelled size text, e.g. `"Size: M"`.
    pub size: Option<String>,
    /// Labelled gender text, e.g. `"Gender: Men"`.
    pub gender: Option<String>,
    /// Capture time, truncated to whole seconds.
    pub extracted_at: DateTime<Utc>,
}

/// A validated, normalized product row ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CleanRecord {
    pub title: String,
    /// Price converted to Indonesian rupiah.
    pub price_idr: Decimal,
    pub rating: Decimal,
    pub colors_count: u32,
    pub size: String,
    pub gender: String,
    pub extracted_at: DateTime<Utc>,
}
