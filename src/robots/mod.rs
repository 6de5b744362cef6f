//! Robots.txt handling module
//!
//! This module is the crawl's permission oracle. The policy is fetched once
//! per run through the same fetcher used for pages. When it cannot be loaded
//! the crawl proceeds unrestricted, which is represented by `None` rather than
//! by a permissive placeholder policy.

mod parser;

pub use parser::CrawlPolicy;

use crate::crawler::PageFetcher;
use crate::url::Address;

/// Fetches and parses the robots.txt of the site containing `root`
///
/// # Returns
///
/// * `Some(CrawlPolicy)` - The site's policy
/// * `None` - The policy could not be fetched; the failure is logged as a warning
pub async fn load_policy<F: PageFetcher>(fetcher: &F, root: &Address) -> Option<CrawlPolicy> {
    let Some(robots_url) = root.robots_txt() else {
        tracing::warn!("Could not derive robots.txt location from {}", root);
        return None;
    };

    match fetcher.fetch(&robots_url).await {
        Ok(body) => {
            tracing::info!("robots.txt fetched and parsed from {}", robots_url);
            Some(CrawlPolicy::from_content(&body))
        }
        Err(failure) => {
            tracing::warn!(
                "Error fetching robots.txt from {}: {}. Proceeding without robots.txt restrictions (be cautious!)",
                robots_url,
                failure
            );
            None
        }
    }
}

/// Checks if an address may be fetched
///
/// # Arguments
///
/// * `address` - The address to check
/// * `policy` - The loaded policy, or `None` when it was unavailable
/// * `user_agent` - The crawler's product token
///
/// # Returns
///
/// * `true` - If there is no policy, or the policy allows the address
/// * `false` - If the policy disallows the address
pub fn is_allowed(address: &Address, policy: Option<&CrawlPolicy>, user_agent: &str) -> bool {
    match policy {
        None => true,
        Some(policy) => policy.is_allowed(address.as_str(), user_agent),
    }
}
