use fstudio_core::{AppConfig, DedupKey, DEFAULT_EXCHANGE_RATE, UNKNOWN_PRODUCT_TITLE};
use rust_decimal::Decimal;

/// Tunable validation rules for [`crate::transform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRules {
    /// Title that marks a broken listing; records carrying it are dropped.
    pub invalid_title: String,
    /// Multiplier from source USD to IDR.
    pub exchange_rate: Decimal,
    /// Inclusive lower rating bound.
    pub rating_min: Decimal,
    /// Inclusive upper rating bound.
    pub rating_max: Decimal,
    pub dedup_key: DedupKey,
}

impl Default for TransformRules {
    fn default() -> Self {
        Self {
            invalid_title: UNKNOWN_PRODUCT_TITLE.to_owned(),
            exchange_rate: Decimal::from(DEFAULT_EXCHANGE_RATE),
            rating_min: Decimal::ZERO,
            rating_max: Decimal::from(5),
            dedup_key: DedupKey::FullRow,
        }
    }
}

impl TransformRules {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            exchange_rate: config.exchange_rate,
            rating_min: config.rating_min,
            rating_max: config.rating_max,
            dedup_key: config.dedup_key,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn rating_in_range(&self, rating: Decimal) -> bool {
        rating >= self.rating_min && rating <= self.rating_max
    }
}
