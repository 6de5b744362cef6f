//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the controller's run lifecycle (idle, running, draining, terminated)
//! - `SkipReason` / `SkippedPage`: why a visited address produced no record

mod crawl_phase;
mod skip_reason;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use skip_reason::{SkipReason, SkippedPage};
