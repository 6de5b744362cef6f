//! Crawl controller - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Loading the site's robots.txt policy
//! - Managing the frontier queue and visited set
//! - Coordinating politeness delays, fetching, extraction and link scoping
//! - Handing the collected records to the result sink

use crate::config::Config;
use crate::crawler::extractor::extract;
use crate::crawler::frontier::Frontier;
use crate::crawler::throttle::{effective_delay, Throttle};
use crate::crawler::PageFetcher;
use crate::output::{CrawlReport, PageRecord, ResultSink};
use crate::robots::{is_allowed, load_policy, CrawlPolicy};
use crate::state::{CrawlPhase, SkipReason, SkippedPage};
use crate::url::{Address, ScopeFilter};
use crate::SurveyError;
use chrono::Local;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;

/// Settings the controller needs from the configuration
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Product token matched against robots.txt user-agent groups
    pub agent: String,

    /// Minimum time between the start of two fetches
    pub delay: Duration,

    /// Stretch `delay` to a longer robots.txt Crawl-delay
    pub honor_crawl_delay: bool,

    /// Path suffixes excluded from the crawl
    pub media_extensions: Vec<String>,
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            agent: config.user_agent.crawler_name.clone(),
            delay: Duration::from_millis(config.crawler.delay_ms),
            honor_crawl_delay: config.crawler.honor_crawl_delay,
            media_extensions: config.crawler.media_extensions.clone(),
        }
    }
}

/// Cooperative stop request for a running crawl
///
/// Checked at the top of every crawl iteration and raced against the
/// politeness wait. An in-flight fetch always completes before the crawl halts.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<StopState>);

#[derive(Debug, Default)]
struct StopState {
    raised: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.raised.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    pub fn is_raised(&self) -> bool {
        self.0.raised.load(Ordering::SeqCst)
    }

    /// Completes once the signal has been raised
    pub async fn raised(&self) {
        loop {
            let notified = self.0.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent raise is not missed
            notified.as_mut().enable();
            if self.is_raised() {
                return;
            }
            notified.await;
        }
    }
}

/// Single-site crawl controller
///
/// Owns all crawl state for exactly one run. Collaborators are injected: any
/// [`PageFetcher`] provides transport and any [`ResultSink`] persists records.
pub struct Crawler<F, S> {
    settings: CrawlSettings,
    fetcher: F,
    sink: S,
    stop: StopSignal,
    phase: CrawlPhase,
    throttle: Throttle,
    frontier: Frontier,
    visited: HashSet<Address>,
    records: Vec<PageRecord>,
    skipped: Vec<SkippedPage>,
}

impl<F: PageFetcher, S: ResultSink> Crawler<F, S> {
    /// Creates a new controller in the idle phase
    pub fn new(settings: CrawlSettings, fetcher: F, sink: S) -> Self {
        let throttle = Throttle::new(settings.delay);
        Self {
            settings,
            fetcher,
            sink,
            stop: StopSignal::new(),
            phase: CrawlPhase::Idle,
            throttle,
            frontier: Frontier::new(),
            visited: HashSet::new(),
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Replaces the controller's stop signal with a shared one
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// A handle that can halt this crawl from elsewhere
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn visited(&self) -> &HashSet<Address> {
        &self.visited
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), SurveyError> {
        if !self.phase.can_transition_to(to) {
            return Err(SurveyError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!("Crawl phase: {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Runs the crawl from `root` to completion
    ///
    /// This is the core crawling logic that:
    /// 1. Loads robots.txt (best effort)
    /// 2. Seeds the frontier with `root`
    /// 3. Repeatedly dequeues, checks policy, fetches, extracts and enqueues
    ///    unseen in-scope links until the frontier is empty or a stop is requested
    /// 4. Hands the records to the sink exactly once
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The run finished and its results were persisted
    /// * `Err(SurveyError)` - The controller was already used, or the sink failed
    pub async fn run(&mut self, root: Address) -> Result<CrawlReport, SurveyError> {
        self.transition(CrawlPhase::Running)?;

        let started_at = Local::now();
        let clock = Instant::now();
        tracing::info!("Starting website scrape for {} at {}", root, started_at);

        self.throttle.wait().await;
        let policy = load_policy(&self.fetcher, &root).await;
        self.apply_crawl_delay(policy.as_ref());

        let scope = ScopeFilter::new(root.clone(), &self.settings.media_extensions);
        self.frontier.push(root.clone());

        let mut stopped_early = false;
        loop {
            if self.stop.is_raised() {
                if !self.frontier.is_empty() {
                    tracing::warn!(
                        "Stop requested; halting with {} URLs left in frontier",
                        self.frontier.len()
                    );
                    stopped_early = true;
                }
                break;
            }

            let Some(address) = self.frontier.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            if !self.visited.insert(address.clone()) {
                continue;
            }

            self.visit(address, policy.as_ref(), &scope).await;

            if self.visited.len() % 10 == 0 {
                let rate = self.visited.len() as f64 / clock.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {:.2} pages/sec",
                    self.visited.len(),
                    self.frontier.len(),
                    rate
                );
            }
        }

        self.transition(CrawlPhase::Draining)?;
        let written = self.sink.write(&self.records);
        self.transition(CrawlPhase::Terminated)?;

        let finished_at = Local::now();
        let elapsed = clock.elapsed();
        tracing::info!(
            "Website scrape finished at {}. Total time taken: {:?}",
            finished_at,
            elapsed
        );

        let output = written.map_err(|e| {
            tracing::error!("Error saving crawl results: {}", e);
            e
        })?;

        Ok(CrawlReport {
            root,
            started_at,
            finished_at,
            elapsed,
            policy_loaded: policy.is_some(),
            effective_delay: self.throttle.interval(),
            pages_visited: self.visited.len(),
            pages_crawled: self.records.len(),
            skipped: self.skipped.clone(),
            stopped_early,
            output,
        })
    }

    fn apply_crawl_delay(&mut self, policy: Option<&CrawlPolicy>) {
        if !self.settings.honor_crawl_delay {
            return;
        }
        let crawl_delay = policy.and_then(|p| p.crawl_delay(&self.settings.agent));
        let delay = effective_delay(
            self.settings.delay,
            crawl_delay,
            self.settings.honor_crawl_delay,
        );
        if delay != self.settings.delay {
            tracing::info!(
                "Honoring robots.txt Crawl-delay: politeness interval is {:?}",
                delay
            );
        }
        self.throttle.set_interval(delay);
    }

    /// Processes one freshly visited address
    async fn visit(&mut self, address: Address, policy: Option<&CrawlPolicy>, scope: &ScopeFilter) {
        if !is_allowed(&address, policy, &self.settings.agent) {
            tracing::info!("robots.txt disallowed: Skipping {}", address);
            self.skip(address, SkipReason::PolicyDenied);
            return;
        }

        tokio::select! {
            _ = self.throttle.wait() => {}
            _ = self.stop.raised() => {
                // Not fetched yet, so it is still pending work
                self.visited.remove(&address);
                self.frontier.requeue(address);
                return;
            }
        }

        tracing::info!("Crawling: {}", address);

        let markup = match self.fetcher.fetch(&address).await {
            Ok(markup) => markup,
            Err(failure) => {
                tracing::warn!("Failed to fetch content for {}: {}", address, failure);
                self.skip(address, SkipReason::FetchFailed(failure));
                return;
            }
        };

        let (record, links) = extract(&markup, &address);
        self.records.push(record);

        let enqueued = self.enqueue_links(links, scope);
        tracing::debug!("{}: {} new URLs enqueued", address, enqueued);
    }

    /// Appends unseen in-scope links to the frontier, returning how many were added
    fn enqueue_links(&mut self, links: Vec<Address>, scope: &ScopeFilter) -> usize {
        let mut enqueued = 0;
        for link in links {
            if !scope.is_in_scope(&link) || self.visited.contains(&link) {
                continue;
            }
            if self.frontier.push(link) {
                enqueued += 1;
            }
        }
        enqueued
    }

    fn skip(&mut self, address: Address, reason: SkipReason) {
        self.skipped.push(SkippedPage { address, reason });
    }
}
