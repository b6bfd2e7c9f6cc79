mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::pipeline::{run_pipeline, PipelineOptions};

#[derive(Debug, Parser)]
#[command(name = "fstudio")]
#[command(about = "Scrape the Fashion Studio catalog, clean it, and save it as CSV")]
struct Cli {
    /// Maximum number of listing pages to scrape (0 = no limit).
    #[arg(long)]
    max_pages: Option<usize>,

    /// Where to write the cleaned products.
    #[arg(long)]
    output_csv: Option<PathBuf>,

    /// Catalog root to start scraping from.
    #[arg(long)]
    base_url: Option<String>,

    /// Also save the unprocessed scrape to this CSV file.
    #[arg(long)]
    raw_csv: Option<PathBuf>,

    /// Also save the cleaned records, before loading, to this CSV file.
    #[arg(long)]
    transformed_csv: Option<PathBuf>,

    /// Google Sheets destination (not implemented; reported as skipped).
    #[arg(long, env = "FSTUDIO_GOOGLE_SHEET_ID")]
    google_sheet_id: Option<String>,

    /// PostgreSQL destination (not implemented; reported as skipped).
    #[arg(long = "postgresql-conn", env = "FSTUDIO_POSTGRESQL_CONN")]
    postgresql_conn: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so `env = ...` flags see values from `.env`.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = fstudio_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let options = PipelineOptions::resolve(&config, cli);
    let summary = run_pipeline(&config, &options).await?;

    println!(
        "saved {} of {} extracted products to {}",
        summary.clean.len(),
        summary.extracted,
        options.output_csv.display()
    );
    for entry in &summary.load.entries {
        println!("  {}: {}", entry.destination, entry.status);
    }
    Ok(())
}
