//! Robots.txt policy representation
//!
//! Allow/Disallow evaluation is delegated to the robotstxt crate, which
//! implements the longest-match rule selection of the robots exclusion
//! standard. Crawl-delay is not covered by that crate and is parsed here.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// A site's crawl policy, loaded once per run
#[derive(Debug, Clone)]
pub struct CrawlPolicy {
    /// Raw robots.txt content
    content: String,
}

impl CrawlPolicy {
    /// Creates a policy from raw robots.txt content
    ///
    /// Content that contains no recognizable directives permits everything.
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks if a URL is allowed for the given user agent token
    ///
    /// The verdict comes from the most specific rule in the group matching
    /// `user_agent`, falling back to the `*` group; with no matching rule the
    /// URL is allowed.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The crawler's product token (e.g. "WebsiteScraperBot")
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Gets the crawl delay declared for a user agent
    ///
    /// A group naming the agent wins over the `*` group. Agent names compare
    /// case-insensitively.
    ///
    /// # Returns
    ///
    /// * `Some(Duration)` - The declared delay, saturating at `Duration::MAX`
    /// * `None` - No applicable or parseable Crawl-delay directive
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        let agent = user_agent.to_lowercase();

        let mut group_agents: Vec<String> = Vec::new();
        let mut in_agent_lines = false;
        let mut for_agent: Option<f64> = None;
        let mut for_wildcard: Option<f64> = None;

        for line in self.content.lines() {
            // Strip trailing comments
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group
                    if !in_agent_lines {
                        group_agents.clear();
                        in_agent_lines = true;
                    }
                    group_agents.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    in_agent_lines = false;
                    let Ok(seconds) = value.parse::<f64>() else {
                        continue;
                    };
                    if !seconds.is_finite() || seconds < 0.0 {
                        continue;
                    }
                    if group_agents.iter().any(|ua| ua == &agent) {
                        for_agent.get_or_insert(seconds);
                    } else if group_agents.iter().any(|ua| ua == "*") {
                        for_wildcard.get_or_insert(seconds);
                    }
                }
                _ => in_agent_lines = false,
            }
        }

        for_agent
            .or(for_wildcard)
            .map(|seconds| Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
    }
}
