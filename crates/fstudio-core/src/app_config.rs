use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Which fields decide that two clean records are duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupKey {
    /// Every field must match.
    #[default]
    FullRow,
    /// Only the title must match; the first occurrence wins.
    Title,
}

impl FromStr for DedupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-row" | "full_row" => Ok(Self::FullRow),
            "title" => Ok(Self::Title),
            other => Err(format!("expected \"full-row\" or \"title\", got \"{other}\"")),
        }
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DedupKey::FullRow => write!(f, "full-row"),
            DedupKey::Title => write!(f, "title"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    /// `None` means pagination runs until an empty page or a fetch failure.
    pub max_pages: Option<usize>,
    pub output_csv: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    /// Upper bound of the random extra delay added between page fetches.
    pub delay_jitter_ms: u64,
    pub exchange_rate: Decimal,
    pub rating_min: Decimal,
    pub rating_max: Decimal,
    pub dedup_key: DedupKey,
}
