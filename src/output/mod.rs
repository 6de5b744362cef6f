//! Output module for persisting crawl results
//!
//! This module handles:
//! - The [`PageRecord`] produced for each crawled page
//! - The [`ResultSink`] interface and its CSV implementation
//! - The end-of-run [`CrawlReport`]

mod csv_output;
mod record;
mod report;
mod traits;

pub use csv_output::{output_path, CsvSink};
pub use record::{PageRecord, BLANK, CSV_HEADER};
pub use report::{print_report, CrawlReport};
pub use traits::{MemorySink, OutputError, OutputResult, ResultSink, WriteOutcome};
