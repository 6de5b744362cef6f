//! Crawl-wide politeness throttle
//!
//! Every fetch, robots.txt included, passes through a single [`Throttle`]
//! which guarantees that at least `interval` has elapsed since the previous
//! fetch began. The throttle is not keyed by domain or path: a run only ever
//! talks to one site.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Upper bound applied to a robots.txt Crawl-delay
pub const MAX_CRAWL_DELAY: Duration = Duration::from_secs(60);

/// Spaces out the start of consecutive fetches
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_start: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: None,
        }
    }

    /// The current minimum interval between fetch starts
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Suspends until the next fetch may begin, then marks it as begun
    ///
    /// The first call returns immediately.
    pub async fn wait(&mut self) {
        if let Some(last_start) = self.last_start {
            let ready_at = last_start + self.interval;
            if ready_at > Instant::now() {
                tracing::trace!("Politeness delay: waiting {:?}", ready_at - Instant::now());
                sleep_until(ready_at).await;
            }
        }
        self.last_start = Some(Instant::now());
    }
}

/// Calculates the effective politeness interval
///
/// This takes the maximum of:
/// - The configured delay
/// - The robots.txt crawl delay (if honored and specified), capped at [`MAX_CRAWL_DELAY`]
pub fn effective_delay(
    configured: Duration,
    crawl_delay: Option<Duration>,
    honor_crawl_delay: bool,
) -> Duration {
    match crawl_delay {
        Some(declared) if honor_crawl_delay => configured.max(declared.min(MAX_CRAWL_DELAY)),
        _ => configured,
    }
}
