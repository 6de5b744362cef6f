//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! HTTP fetcher and CSV sink through full crawl runs.

use site_survey::config::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_MEDIA_EXTENSIONS,
};
use site_survey::crawler::{crawl, CrawlSettings, Crawler, HttpFetcher};
use site_survey::output::{CsvSink, WriteOutcome, CSV_HEADER};
use site_survey::url::Address;
use site_survey::{SkipReason, StopSignal};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for a crawl rooted at `root_url`
fn create_test_config(root_url: &str, output_dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            root_url: root_url.to_string(),
            delay_ms: 10, // Very short for testing
            request_timeout_secs: 5,
            honor_crawl_delay: true,
            media_extensions: DEFAULT_MEDIA_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
        output: OutputConfig {
            directory: output_dir.display().to_string(),
            file_prefix: "scrape".to_string(),
            log_file: None,
        },
    }
}

/// Builds a crawler over the real HTTP fetcher writing to `csv_path`
fn create_crawler(config: &Config, csv_path: &Path) -> Crawler<HttpFetcher, CsvSink> {
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)
        .expect("Failed to build HTTP client");
    Crawler::new(
        CrawlSettings::from_config(config),
        fetcher,
        CsvSink::new(csv_path),
    )
}

async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn read_rows(csv_path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(csv_path).expect("Failed to open CSV");
    let header = reader
        .headers()
        .expect("Missing header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad row").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><head>
            <title>Home</title>
            <meta name="description" content="Welcome home">
            <meta property="og:title" content="Home | Example">
        </head><body>
            <a href="/a">A</a>
            <a href="b">B</a>
            <a href="https://other.test/x">External</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&mock_server, "/a", "<title>Page A</title>".to_string()).await;
    mount_page(&mock_server, "/b", "<p>No title here</p>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("scrape.csv");
    let config = create_test_config(&format!("{}/", base_url), dir.path());
    let mut crawler = create_crawler(&config, &csv_path);

    let root = Address::parse(&config.crawler.root_url).unwrap();
    let report = crawler.run(root).await.expect("Crawl failed");

    assert!(report.policy_loaded);
    assert_eq!(report.pages_crawled, 3);
    assert_eq!(
        report.output,
        WriteOutcome::Written {
            location: csv_path.clone(),
            rows: 3
        }
    );

    let (header, rows) = read_rows(&csv_path);
    assert_eq!(header, CSV_HEADER);
    assert_eq!(
        rows,
        vec![
            vec![
                "Home".to_string(),
                "Home | Example".to_string(),
                "Welcome home".to_string(),
                format!("{}/", base_url),
            ],
            vec![
                "Page A".to_string(),
                "blank".to_string(),
                "blank".to_string(),
                format!("{}/a", base_url),
            ],
            vec![
                "blank".to_string(),
                "blank".to_string(),
                "blank".to_string(),
                format!("{}/b", base_url),
            ],
        ]
    );
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nDisallow: /admin").await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/allowed">Allowed</a><a href="/admin">Admin</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/allowed", "<title>Allowed</title>".to_string()).await;

    // Should never be called
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Admin</title>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("scrape.csv");
    let config = create_test_config(&format!("{}/", base_url), dir.path());
    let mut crawler = create_crawler(&config, &csv_path);

    let report = crawler
        .run(Address::parse(&config.crawler.root_url).unwrap())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.policy_denied_count(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::PolicyDenied);

    let (_, rows) = read_rows(&csv_path);
    assert_eq!(rows.len(), 2);

    // Wiremock verifies the expect(0) when mock_server drops
}

#[tokio::test]
async fn test_missing_robots_txt_crawls_unrestricted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // No robots.txt mock: wiremock answers 404
    mount_page(&mock_server, "/", r#"<a href="/private">P</a>"#.to_string()).await;
    mount_page(&mock_server, "/private", "<title>Private</title>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("scrape.csv");
    let config = create_test_config(&format!("{}/", base_url), dir.path());
    let mut crawler = create_crawler(&config, &csv_path);

    let report = crawler
        .run(Address::parse(&config.crawler.root_url).unwrap())
        .await
        .expect("Crawl failed");

    assert!(!report.policy_loaded);
    assert_eq!(report.pages_crawled, 2);
}

#[tokio::test]
async fn test_failed_page_is_skipped_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/b">B</a>"#.to_string()).await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("scrape.csv");
    let config = create_test_config(&format!("{}/", base_url), dir.path());
    let mut crawler = create_crawler(&config, &csv_path);

    let report = crawler
        .run(Address::parse(&config.crawler.root_url).unwrap())
        .await
        .expect("Crawl failed");

    assert_eq!(report.fetch_failed_count(), 1);
    assert_eq!(report.skipped[0].address.path(), "/b");

    let (_, rows) = read_rows(&csv_path);
    let links: Vec<&str> = rows.iter().map(|row| row[3].as_str()).collect();
    assert_eq!(
        links,
        vec![format!("{}/", base_url), format!("{}/a", base_url)]
    );
}

#[tokio::test]
async fn test_media_links_never_requested() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/report.pdf">Report</a><a href="/pics/cat.png">Cat</a>"#.to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("scrape.csv");
    let config = create_test_config(&format!("{}/", base_url), dir.path());
    let mut crawler = create_crawler(&config, &csv_path);

    let report = crawler
        .run(Address::parse(&config.crawler.root_url).unwrap())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.pages_crawled, 1);
}

#[tokio::test]
async fn test_empty_crawl_writes_no_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("scrape.csv");
    let config = create_test_config(&format!("{}/", base_url), dir.path());
    let mut crawler = create_crawler(&config, &csv_path);

    let report = crawler
        .run(Address::parse(&config.crawler.root_url).unwrap())
        .await
        .expect("Empty crawl should succeed");

    assert_eq!(report.output, WriteOutcome::Empty);
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_crawl_entry_point_writes_dated_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;
    mount_page(&mock_server, "/", "<title>Home</title>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", base_url), dir.path());
    let root = Address::parse(&config.crawler.root_url).unwrap();

    let report = crawl(&config, root, StopSignal::new())
        .await
        .expect("Crawl failed");

    let WriteOutcome::Written { location, rows } = report.output else {
        panic!("expected a written CSV file");
    };
    assert_eq!(rows, 1);
    assert!(location.starts_with(dir.path()));

    let file_name = location.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("scrape_"));
    assert!(file_name.ends_with(".csv"));
    // scrape_YYYY-MM-DD.csv
    assert_eq!(file_name.len(), "scrape_2024-01-01.csv".len());
    assert!(location.exists());
}
