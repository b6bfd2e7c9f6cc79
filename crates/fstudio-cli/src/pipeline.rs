//! Extract → Transform → Load, run once.
//!
//! Per-page and per-record problems are logged and contained inside their
//! stage. The run fails only when a stage leaves nothing to hand on or the
//! CSV destination cannot be written.

use std::path::PathBuf;
use std::time::Instant;

use fstudio_core::{AppConfig, CleanRecord};
use fstudio_load::{load_all, write_raw_csv, CsvLoader, LoadResults, LoadStatus, Loader};
use fstudio_scraper::{CatalogClient, StopReason};
use fstudio_transform::{transform_with_report, TransformRules};

use crate::Cli;

/// Effective settings for one run: config values with CLI overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PipelineOptions {
    pub base_url: String,
    pub max_pages: Option<usize>,
    pub output_csv: PathBuf,
    pub raw_csv: Option<PathBuf>,
    pub transformed_csv: Option<PathBuf>,
    pub google_sheet_id: Option<String>,
    pub postgresql_conn: Option<String>,
}

impl PipelineOptions {
    pub(crate) fn resolve(config: &AppConfig, cli: Cli) -> Self {
        let max_pages = match cli.max_pages {
            Some(0) => None,
            Some(n) => Some(n),
            None => config.max_pages,
        };
        Self {
            base_url: cli.base_url.unwrap_or_else(|| config.base_url.clone()),
            max_pages,
            output_csv: cli.output_csv.unwrap_or_else(|| config.output_csv.clone()),
            raw_csv: cli.raw_csv,
            transformed_csv: cli.transformed_csv,
            google_sheet_id: cli.google_sheet_id,
            postgresql_conn: cli.postgresql_conn,
        }
    }

    /// Destinations that were asked for but have no implementation.
    fn unimplemented_destinations(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.google_sheet_id.is_some() {
            names.push("google_sheets");
        }
        if self.postgresql_conn.is_some() {
            names.push("postgresql");
        }
        names
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub(crate) struct PipelineSummary {
    pub extracted: usize,
    pub clean: Vec<CleanRecord>,
    pub load: LoadResults,
}

/// Runs the full pipeline once.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, nothing was
/// extracted, no record survived transformation, or a destination failed.
pub(crate) async fn run_pipeline(
    config: &AppConfig,
    options: &PipelineOptions,
) -> anyhow::Result<PipelineSummary> {
    let started = Instant::now();
    tracing::info!(base_url = %options.base_url, max_pages = ?options.max_pages, "pipeline started");

    // Extract
    let client = CatalogClient::new(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?
        .with_page_delay(config.inter_request_delay_ms, config.delay_jitter_ms);
    let extraction = client
        .extract_with_report(&options.base_url, options.max_pages)
        .await;
    if let StopReason::FetchFailed { page, error } = &extraction.stop {
        tracing::warn!(page, error = %error, "extraction ended early; keeping records collected so far");
    }
    if extraction.records.is_empty() {
        anyhow::bail!("no products were extracted from {}", options.base_url);
    }
    let extracted = extraction.records.len();

    if let Some(raw_path) = &options.raw_csv {
        match write_raw_csv(&extraction.records, raw_path) {
            Ok(rows) => tracing::info!(path = %raw_path.display(), rows, "raw snapshot saved"),
            Err(e) => tracing::warn!(path = %raw_path.display(), error = %e, "raw snapshot not saved"),
        }
    }

    // Transform
    let rules = TransformRules::from_app_config(config);
    let (clean, report) = transform_with_report(&extraction.records, &rules);
    for (reason, count) in &report.rejected {
        tracing::info!(reason = %reason, count, "records rejected");
    }
    if clean.is_empty() {
        anyhow::bail!("none of the {extracted} extracted records survived transformation");
    }

    if let Some(snapshot_path) = &options.transformed_csv {
        let snapshot = CsvLoader::new(snapshot_path);
        match snapshot.load(&clean) {
            Ok(rows) => {
                tracing::info!(path = %snapshot.path().display(), rows, "transformed snapshot saved");
            }
            Err(e) => {
                tracing::warn!(path = %snapshot.path().display(), error = %e, "transformed snapshot not saved");
            }
        }
    }

    // Load
    let csv = CsvLoader::new(&options.output_csv);
    let loaders: [&dyn Loader; 1] = [&csv];
    let load = load_all(&clean, &loaders, &options.unimplemented_destinations());
    for entry in &load.entries {
        match &entry.status {
            LoadStatus::Success { rows } => {
                tracing::info!(destination = %entry.destination, rows, "destination loaded");
            }
            LoadStatus::Failed { error } => {
                tracing::error!(destination = %entry.destination, error = %error, "destination failed");
            }
            LoadStatus::Skipped => {
                tracing::info!(destination = %entry.destination, "destination skipped");
            }
        }
    }
    if !load.all_succeeded() {
        anyhow::bail!("failed to load records to {}", csv.path().display());
    }

    tracing::info!(
        extracted,
        saved = clean.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "pipeline completed"
    );

    Ok(PipelineSummary {
        extracted,
        clean,
        load,
    })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
