//! Configuration module for Site-Survey
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use site_survey::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-survey.toml")).unwrap();
//! println!("Politeness delay: {}ms", config.crawler.delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_MEDIA_EXTENSIONS};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_root_url, MIN_DELAY_MS};
