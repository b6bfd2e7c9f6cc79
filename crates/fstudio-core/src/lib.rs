//! Shared types and configuration for the Fashion Studio catalog pipeline.

mod app_config;
mod config;
mod records;

use thiserror::Error;

pub use app_config::{AppConfig, DedupKey};
pub use config::load_app_config_from_env;
pub use records::{CleanRecord, RawRecord};

/// Catalog root scraped when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://fashion-studio.dicoding.dev";

/// Placeholder title the catalog renders for broken listings.
pub const UNKNOWN_PRODUCT_TITLE: &str = "Unknown Product";

/// USD → IDR conversion rate applied to every scraped price.
pub const DEFAULT_EXCHANGE_RATE: i64 = 16_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("rating bounds are inverted: min {min} is greater than max {max}")]
    InvalidRatingBounds { min: String, max: String },
}
