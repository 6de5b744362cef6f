//! CSV result sink
//!
//! Writes one file per run, named from the run date
//! (`<directory>/<prefix>_<YYYY-MM-DD>.csv`), with the header row
//! `Page Title,Meta Title,Meta Description,Link`.

use crate::config::OutputConfig;
use crate::output::{OutputResult, PageRecord, ResultSink, WriteOutcome};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// Result sink writing a dated CSV file
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink writing to an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the sink for a run started at `run_started`
    pub fn for_run<Tz>(config: &OutputConfig, run_started: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self::new(output_path(config, run_started))
    }

    /// Destination file of this sink
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Computes the dated output path for a run
pub fn output_path<Tz>(config: &OutputConfig, run_started: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let file_name = format!(
        "{}_{}.csv",
        config.file_prefix,
        run_started.format("%Y-%m-%d")
    );
    Path::new(&config.directory).join(file_name)
}

impl ResultSink for CsvSink {
    fn write(&mut self, records: &[PageRecord]) -> OutputResult<WriteOutcome> {
        if records.is_empty() {
            tracing::info!("No data to save to CSV.");
            return Ok(WriteOutcome::Empty);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::info!(
            "Successfully saved {} rows to CSV file: {}",
            records.len(),
            self.path.display()
        );

        Ok(WriteOutcome::Written {
            location: self.path.clone(),
            rows: records.len(),
        })
    }
}
