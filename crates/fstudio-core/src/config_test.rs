use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "https://fashion-studio.dicoding.dev");
    assert_eq!(cfg.max_pages, Some(50));
    assert_eq!(cfg.output_csv, PathBuf::from("products.csv"));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "fstudio/0.1 (catalog-etl)");
    assert_eq!(cfg.inter_request_delay_ms, 1000);
    assert_eq!(cfg.delay_jitter_ms, 2000);
    assert_eq!(cfg.exchange_rate, Decimal::from(16_000));
    assert_eq!(cfg.rating_min, Decimal::ZERO);
    assert_eq!(cfg.rating_max, Decimal::from(5));
    assert_eq!(cfg.dedup_key, DedupKey::FullRow);
}

#[test]
fn max_pages_zero_disables_limit() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_MAX_PAGES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.max_pages.is_none());
}

#[test]
fn max_pages_override() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_MAX_PAGES", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_pages, Some(3));
}

#[test]
fn max_pages_invalid_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_MAX_PAGES", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FSTUDIO_MAX_PAGES"),
        "expected InvalidEnvVar(FSTUDIO_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FSTUDIO_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FSTUDIO_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn exchange_rate_override_is_decimal() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_EXCHANGE_RATE", "15500.50");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.exchange_rate, Decimal::new(1_550_050, 2));
}

#[test]
fn exchange_rate_must_be_positive() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_EXCHANGE_RATE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FSTUDIO_EXCHANGE_RATE"),
        "expected InvalidEnvVar(FSTUDIO_EXCHANGE_RATE), got: {result:?}"
    );
}

#[test]
fn inverted_rating_bounds_are_rejected() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_RATING_MIN", "4");
    map.insert("FSTUDIO_RATING_MAX", "1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidRatingBounds { .. })),
        "expected InvalidRatingBounds, got: {result:?}"
    );
}

#[test]
fn dedup_key_title() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_DEDUP_KEY", "title");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.dedup_key, DedupKey::Title);
}

#[test]
fn dedup_key_unknown_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_DEDUP_KEY", "sku");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "FSTUDIO_DEDUP_KEY" && reason.contains("sku")),
        "expected InvalidEnvVar(FSTUDIO_DEDUP_KEY), got: {result:?}"
    );
}

#[test]
fn base_url_and_output_override() {
    let mut map = HashMap::new();
    map.insert("FSTUDIO_BASE_URL", "http://127.0.0.1:8080");
    map.insert("FSTUDIO_OUTPUT_CSV", "out/products.csv");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8080");
    assert_eq!(cfg.output_csv, PathBuf::from("out/products.csv"));
}

#[test]
fn from_env_reads_process_environment() {
    std::env::set_var("FSTUDIO_DEDUP_KEY", "title");
    let cfg = load_app_config_from_env().unwrap();
    std::env::remove_var("FSTUDIO_DEDUP_KEY");
    assert_eq!(cfg.dedup_key, DedupKey::Title);
}
