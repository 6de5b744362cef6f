//! Result sink traits and types
//!
//! This module defines the trait interface for persisting a run's records and
//! the associated error type.

use crate::output::PageRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting results
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What a sink did with a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Records were written to `location`
    Written { location: PathBuf, rows: usize },

    /// The result set was empty; nothing was written
    Empty,
}

/// Trait for result sink implementations
///
/// `write` is called exactly once per run, after crawling ends, with the
/// records in crawl-discovery order. An empty slice must succeed without
/// touching the destination.
pub trait ResultSink {
    fn write(&mut self, records: &[PageRecord]) -> OutputResult<WriteOutcome>;
}

/// Sink that keeps records in memory
///
/// Useful for embedding the crawler and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<PageRecord>,
    pub writes: usize,
}

impl ResultSink for MemorySink {
    fn write(&mut self, records: &[PageRecord]) -> OutputResult<WriteOutcome> {
        if records.is_empty() {
            return Ok(WriteOutcome::Empty);
        }
        self.writes += 1;
        self.records = records.to_vec();
        Ok(WriteOutcome::Written {
            location: PathBuf::from("memory"),
            rows: records.len(),
        })
    }
}
