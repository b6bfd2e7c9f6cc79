use clap::Parser;
use rust_decimal::Decimal;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fstudio_core::DedupKey;

use super::*;

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        base_url: base_url.to_owned(),
        max_pages: Some(50),
        output_csv: PathBuf::from("products.csv"),
        log_level: "info".to_owned(),
        request_timeout_secs: 5,
        user_agent: "fstudio-test/0.1".to_owned(),
        inter_request_delay_ms: 0,
        delay_jitter_ms: 0,
        exchange_rate: Decimal::from(16_000),
        rating_min: Decimal::ZERO,
        rating_max: Decimal::from(5),
        dedup_key: DedupKey::FullRow,
    }
}

fn options(base_url: &str, output_csv: PathBuf) -> PipelineOptions {
    PipelineOptions {
        base_url: base_url.to_owned(),
        max_pages: None,
        output_csv,
        raw_csv: None,
        transformed_csv: None,
        google_sheet_id: None,
        postgresql_conn: None,
    }
}

fn card(title: &str, price: &str, rating: &str) -> String {
    format!(
        r#"<div class="collection-card"><div class="product-details">
            <h3 class="product-title">{title}</h3>
            <div class="price-container"><span class="price">{price}</span></div>
            <p>Rating: ⭐ {rating} / 5</p>
            <p>3 Colors</p>
            <p>Size: M</p>
            <p>Gender: Men</p>
        </div></div>"#
    )
}

fn html(cards: &[String]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", cards.concat()),
        "text/html",
    )
}

async fn mock_catalog(pages: Vec<Vec<String>>) -> MockServer {
    let server = MockServer::start().await;
    for (i, cards) in pages.into_iter().enumerate() {
        let route = if i == 0 {
            "/".to_owned()
        } else {
            format!("/page{}", i + 1)
        };
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html(&cards))
            .mount(&server)
            .await;
    }
    server
}

#[tokio::test]
async fn full_run_writes_clean_csv() {
    let server = mock_catalog(vec![
        vec![
            card("T-shirt 1", "$10.00", "4.5"),
            card("Unknown Product", "$99.00", "4.0"),
            card("T-shirt 1", "$10.00", "4.5"),
        ],
        vec![card("Pants 2", "$20.50", "3.9"), card("Jacket 3", "$5.00", "Invalid Rating")],
        vec![],
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("products.csv");

    let summary = run_pipeline(&test_config(&server.uri()), &options(&server.uri(), out.clone()))
        .await
        .expect("pipeline should succeed");

    assert_eq!(summary.extracted, 5);
    let titles: Vec<&str> = summary.clean.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["T-shirt 1", "Pants 2"]);
    assert_eq!(summary.clean[1].price_idr, Decimal::from(328_000));
    assert!(summary.load.all_succeeded());

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Title,Price (IDR),Rating,Colors,Size,Gender,Timestamp")
    );
    assert_eq!(content.lines().count(), 3);
}

#[tokio::test]
async fn raw_snapshot_and_placeholders_are_reported() {
    let server = mock_catalog(vec![vec![card("Hoodie 4", "$12.00", "4.1")], vec![]]).await;
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(&server.uri(), dir.path().join("products.csv"));
    opts.raw_csv = Some(dir.path().join("raw_products.csv"));
    opts.google_sheet_id = Some("sheet".to_owned());
    opts.postgresql_conn = Some("postgres://localhost/db".to_owned());

    let summary = run_pipeline(&test_config(&server.uri()), &opts)
        .await
        .expect("pipeline should succeed");

    assert!(dir.path().join("raw_products.csv").exists());
    assert_eq!(
        summary.load.status_of("google_sheets"),
        Some(&LoadStatus::Skipped)
    );
    assert_eq!(summary.load.status_of("postgresql"), Some(&LoadStatus::Skipped));
    assert_eq!(
        summary.load.status_of("csv"),
        Some(&LoadStatus::Success { rows: 1 })
    );
}

#[tokio::test]
async fn transformed_snapshot_matches_the_loaded_rows() {
    let server = mock_catalog(vec![vec![
        card("Shirt 7", "$8.00", "4.8"),
        card("Unknown Product", "$1.00", "1.0"),
    ], vec![]])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(&server.uri(), dir.path().join("products.csv"));
    opts.transformed_csv = Some(dir.path().join("transformed_products.csv"));

    run_pipeline(&test_config(&server.uri()), &opts)
        .await
        .expect("pipeline should succeed");

    let snapshot = std::fs::read_to_string(dir.path().join("transformed_products.csv")).unwrap();
    let output = std::fs::read_to_string(dir.path().join("products.csv")).unwrap();
    assert_eq!(snapshot, output);
    assert_eq!(snapshot.lines().count(), 2);
}

#[tokio::test]
async fn unwritable_transformed_snapshot_does_not_fail_the_run() {
    let server = mock_catalog(vec![vec![card("Shirt 8", "$8.00", "4.8")], vec![]]).await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file, not a directory").unwrap();
    let mut opts = options(&server.uri(), dir.path().join("products.csv"));
    opts.transformed_csv = Some(blocker.join("transformed_products.csv"));

    let summary = run_pipeline(&test_config(&server.uri()), &opts)
        .await
        .expect("snapshot failure is not fatal");

    assert!(summary.load.all_succeeded());
    assert!(dir.path().join("products.csv").exists());
}

#[tokio::test]
async fn unwritable_destination_fails_the_run() {
    let server = mock_catalog(vec![vec![card("Shirt", "$1.00", "4.0")], vec![]]).await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file, not a directory").unwrap();

    let result = run_pipeline(
        &test_config(&server.uri()),
        &options(&server.uri(), blocker.join("products.csv")),
    )
    .await;

    assert!(result.is_err(), "expected failure, got: {result:?}");
}

#[tokio::test]
async fn nothing_extracted_fails_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("products.csv");

    let result = run_pipeline(&test_config(&server.uri()), &options(&server.uri(), out.clone())).await;

    assert!(result.is_err());
    assert!(!out.exists());
}

#[tokio::test]
async fn all_records_rejected_fails_without_touching_output() {
    let server = mock_catalog(vec![vec![card("Unknown Product", "$1.00", "4.0")], vec![]]).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("products.csv");
    std::fs::write(&out, "previous run").unwrap();

    let result = run_pipeline(&test_config(&server.uri()), &options(&server.uri(), out.clone())).await;

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous run");
}

#[test]
fn cli_overrides_config() {
    let config = test_config("https://fashion-studio.dicoding.dev");
    let cli = Cli::try_parse_from([
        "fstudio",
        "--max-pages",
        "2",
        "--output-csv",
        "custom.csv",
        "--base-url",
        "http://localhost:9999",
    ])
    .unwrap();

    let opts = PipelineOptions::resolve(&config, cli);

    assert_eq!(opts.max_pages, Some(2));
    assert_eq!(opts.output_csv, PathBuf::from("custom.csv"));
    assert_eq!(opts.base_url, "http://localhost:9999");
}

#[test]
fn zero_max_pages_flag_removes_the_limit() {
    let config = test_config("https://fashion-studio.dicoding.dev");
    let cli = Cli::try_parse_from(["fstudio", "--max-pages", "0"]).unwrap();
    assert_eq!(PipelineOptions::resolve(&config, cli).max_pages, None);
}

#[test]
fn config_values_used_without_flags() {
    let config = test_config("https://fashion-studio.dicoding.dev");
    let cli = Cli::try_parse_from(["fstudio"]).unwrap();
    let opts = PipelineOptions::resolve(&config, cli);
    assert_eq!(opts.max_pages, Some(50));
    assert_eq!(opts.output_csv, PathBuf::from("products.csv"));
    assert_eq!(opts.base_url, "https://fashion-studio.dicoding.dev");
    assert!(opts.unimplemented_destinations().is_empty());
}
