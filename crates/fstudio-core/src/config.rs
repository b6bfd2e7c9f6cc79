use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, DedupKey};
use crate::{ConfigError, DEFAULT_BASE_URL, DEFAULT_EXCHANGE_RATE};

/// Load pipeline configuration from environment variables already in the process.
///
/// Does not read `.env` files; the binary loads those once at startup.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can feed a plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_var(var, &or_default(var, default))
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        parse_var(var, &or_default(var, default))
    };

    let base_url = or_default("FSTUDIO_BASE_URL", DEFAULT_BASE_URL);
    let max_pages: usize = parse_var(
        "FSTUDIO_MAX_PAGES",
        &or_default("FSTUDIO_MAX_PAGES", "50"),
    )?;
    let output_csv = PathBuf::from(or_default("FSTUDIO_OUTPUT_CSV", "products.csv"));
    let log_level = or_default("FSTUDIO_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("FSTUDIO_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FSTUDIO_USER_AGENT", "fstudio/0.1 (catalog-etl)");
    let inter_request_delay_ms = parse_u64("FSTUDIO_INTER_REQUEST_DELAY_MS", "1000")?;
    let delay_jitter_ms = parse_u64("FSTUDIO_DELAY_JITTER_MS", "2000")?;

    let exchange_rate =
        parse_decimal("FSTUDIO_EXCHANGE_RATE", &DEFAULT_EXCHANGE_RATE.to_string())?;
    if exchange_rate <= Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar {
            var: "FSTUDIO_EXCHANGE_RATE".to_string(),
            reason: format!("exchange rate must be positive, got {exchange_rate}"),
        });
    }

    let rating_min = parse_decimal("FSTUDIO_RATING_MIN", "0")?;
    let rating_max = parse_decimal("FSTUDIO_RATING_MAX", "5")?;
    if rating_min > rating_max {
        return Err(ConfigError::InvalidRatingBounds {
            min: rating_min.to_string(),
            max: rating_max.to_string(),
        });
    }

    let dedup_key: DedupKey = parse_var(
        "FSTUDIO_DEDUP_KEY",
        &or_default("FSTUDIO_DEDUP_KEY", "full-row"),
    )?;

    Ok(AppConfig {
        base_url,
        // 0 disables the limit.
        max_pages: (max_pages > 0).then_some(max_pages),
        output_csv,
        log_level,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        delay_jitter_ms,
        exchange_rate,
        rating_min,
        rating_max,
        dedup_key,
    })
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
