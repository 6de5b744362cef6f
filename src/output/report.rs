//! Crawl report
//!
//! A summary of one run, returned by the controller and printed by the CLI.

use crate::output::WriteOutcome;
use crate::state::{SkipReason, SkippedPage};
use crate::url::Address;
use chrono::{DateTime, Local};
use std::time::Duration;

/// Summary of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub root: Address,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed: Duration,

    /// Whether robots.txt was loaded (false means the crawl ran unrestricted)
    pub policy_loaded: bool,

    /// Politeness interval in effect after robots.txt was read
    pub effective_delay: Duration,

    /// Distinct addresses dequeued and attempted
    pub pages_visited: usize,

    /// Records produced
    pub pages_crawled: usize,

    /// Visited addresses that produced no record, in visit order
    pub skipped: Vec<SkippedPage>,

    /// True if a stop signal ended the run before the frontier emptied
    pub stopped_early: bool,

    pub output: WriteOutcome,
}

impl CrawlReport {
    pub fn policy_denied_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.reason.is_policy_denied())
            .count()
    }

    pub fn fetch_failed_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::FetchFailed(_)))
            .count()
    }
}

/// Prints a crawl report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Run:");
    println!("  Root: {}", report.root);
    println!("  Started: {}", report.started_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Finished: {}", report.finished_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Elapsed: {:.1}s", report.elapsed.as_secs_f64());
    println!(
        "  robots.txt: {}",
        if report.policy_loaded {
            "loaded"
        } else {
            "unavailable (crawled unrestricted)"
        }
    );
    println!("  Politeness delay: {:?}", report.effective_delay);
    if report.stopped_early {
        println!("  Stopped early: yes");
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", report.pages_visited);
    println!("  Crawled: {}", report.pages_crawled);
    println!("  Disallowed by robots.txt: {}", report.policy_denied_count());
    println!("  Fetch failures: {}", report.fetch_failed_count());
    println!();

    if !report.skipped.is_empty() {
        println!("Skipped:");
        for skipped in &report.skipped {
            println!("  - {} ({})", skipped.address, skipped.reason);
        }
        println!();
    }

    match &report.output {
        WriteOutcome::Written { location, rows } => {
            println!("Output: {} rows written to {}", rows, location.display())
        }
        WriteOutcome::Empty => println!("Output: no pages crawled, nothing written"),
    }
}
