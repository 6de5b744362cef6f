//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] capability
//! - The crawl-wide politeness throttle
//! - HTML extraction of page records and links
//! - The FIFO frontier
//! - Overall crawl control

mod controller;
mod extractor;
mod fetcher;
mod frontier;
mod throttle;

pub use controller::{CrawlSettings, Crawler, StopSignal};
pub use extractor::extract;
pub use fetcher::{build_http_client, fetch_url, FetchFailure, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use throttle::{effective_delay, Throttle, MAX_CRAWL_DELAY};

use crate::config::Config;
use crate::output::{CrawlReport, CsvSink};
use crate::url::Address;
use crate::SurveyError;
use chrono::Local;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher
/// 2. Name the dated CSV output from the current time
/// 3. Crawl the site from `root`
/// 4. Write the collected records
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `root` - Root address (normally `config.crawler.root_url`)
/// * `stop` - Signal that halts the crawl between pages
///
/// # Example
///
/// ```no_run
/// use site_survey::config::load_config;
/// use site_survey::crawler::crawl;
/// use site_survey::url::Address;
/// use site_survey::StopSignal;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("site-survey.toml"))?;
/// let root = Address::parse(&config.crawler.root_url)?;
/// let report = crawl(&config, root, StopSignal::new()).await?;
/// println!("{} pages crawled", report.pages_crawled);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    config: &Config,
    root: Address,
    stop: StopSignal,
) -> Result<CrawlReport, SurveyError> {
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
    let sink = CsvSink::for_run(&config.output, &Local::now());
    tracing::info!("Results will be written to {}", sink.path().display());

    let mut crawler =
        Crawler::new(CrawlSettings::from_config(config), fetcher, sink).with_stop_signal(stop);
    crawler.run(root).await
}
