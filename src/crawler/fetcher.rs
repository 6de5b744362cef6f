//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Classification of transport outcomes into success or [`FetchFailure`]
//!
//! The fetcher never retries; a failed address is skipped by the controller.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::url::Address;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch did not produce a page body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// Connection refused, DNS failure, timeout, TLS error, unreadable body, ...
    #[error("network error: {error}")]
    Network { error: String },

    /// The server answered with a non-2xx status
    #[error("HTTP status {status_code}")]
    Status { status_code: u16 },
}

/// Raw page retrieval capability used by the crawl controller
///
/// Implementations return the response body of a successful (2xx) fetch.
pub trait PageFetcher {
    fn fetch(&self, address: &Address)
        -> impl Future<Output = Result<String, FetchFailure>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings (request timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(crawler.request_timeout_secs);

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the crawl configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        build_http_client(user_agent, crawler).map(Self::new)
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, address: &Address) -> Result<String, FetchFailure> {
        fetch_url(&self.client, address.as_str()).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | `Ok(body)` |
/// | Any other status | `FetchFailure::Status` |
/// | Timeout | `FetchFailure::Network` ("request timeout") |
/// | Connection refused / DNS / TLS | `FetchFailure::Network` |
/// | Body could not be read | `FetchFailure::Network` |
pub async fn fetch_url(client: &Client, url: &str) -> Result<String, FetchFailure> {
    let response = client.get(url).send().await.map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure::Status {
            status_code: status.as_u16(),
        });
    }

    response.text().await.map_err(classify_error)
}

fn classify_error(e: reqwest::Error) -> FetchFailure {
    let error = if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchFailure::Network { error }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> (UserAgentConfig, CrawlerConfig) {
        (
            UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: Some("https://example.com/about".to_string()),
            },
            CrawlerConfig {
                root_url: "https://example.com/".to_string(),
                delay_ms: 1000,
                request_timeout_secs: 5,
                honor_crawl_delay: true,
                media_extensions: Vec::new(),
            },
        )
    }

    #[test]
    fn test_build_http_client() {
        let (user_agent, crawler) = create_test_config();
        assert!(build_http_client(&user_agent, &crawler).is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        let (mut user_agent, _) = create_test_config();
        assert_eq!(
            user_agent.header_value(),
            "TestCrawler/1.0 (+https://example.com/about)"
        );

        user_agent.contact_url = None;
        assert_eq!(user_agent.header_value(), "TestCrawler/1.0");
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            FetchFailure::Status { status_code: 404 }.to_string(),
            "HTTP status 404"
        );
        assert_eq!(
            FetchFailure::Network {
                error: "request timeout".to_string()
            }
            .to_string(),
            "network error: request timeout"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_failure() {
        let (user_agent, mut crawler) = create_test_config();
        crawler.request_timeout_secs = 2;
        let fetcher = HttpFetcher::from_config(&user_agent, &crawler).unwrap();

        // Port 9 (discard) on localhost is essentially never listening
        let address = Address::parse("http://127.0.0.1:9/").unwrap();
        let result = fetcher.fetch(&address).await;
        assert!(matches!(result, Err(FetchFailure::Network { .. })));
    }
}
