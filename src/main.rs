//! Site-Survey main entry point
//!
//! This is the command-line interface for the Site-Survey crawler.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use site_survey::config::{load_config_with_hash, validate_root_url, Config};
use site_survey::crawler::crawl;
use site_survey::output::{output_path, print_report};
use site_survey::StopSignal;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Site-Survey: a polite single-site web crawler
///
/// Site-Survey visits every page reachable from a root address on the same
/// site, respecting robots.txt and a politeness delay, and writes each page's
/// title, meta title and meta description to a dated CSV file.
#[derive(Parser, Debug)]
#[command(name = "site-survey")]
#[command(version)]
#[command(about = "A polite single-site web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Crawl this root address instead of the configured one
    #[arg(long, value_name = "URL")]
    root: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if let Some(root) = &cli.root {
        validate_root_url(root)?;
        config.crawler.root_url = root.clone();
    }

    setup_logging(cli.verbose, cli.quiet, config.output.log_file.as_deref())?;
    tracing::info!(
        "Configuration loaded from {} (hash: {})",
        cli.config.display(),
        config_hash
    );

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// With a configured log file, diagnostics are appended to it instead of
/// being written to the terminal.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&str>) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_survey=info,warn"),
            1 => EnvFilter::new("site_survey=debug,info"),
            2 => EnvFilter::new("site_survey=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .init();
        }
    }

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Site-Survey Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Root: {}", config.crawler.root_url);
    println!("  Politeness delay: {}ms", config.crawler.delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Honor Crawl-delay: {}", config.crawler.honor_crawl_delay);
    println!(
        "  Excluded media suffixes: {}",
        config.crawler.media_extensions.join(" ")
    );

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header_value());
    println!("  robots.txt token: {}", config.user_agent.crawler_name);

    println!("\nOutput:");
    println!(
        "  CSV: {}",
        output_path(&config.output, &Local::now()).display()
    );
    if let Some(log_file) = &config.output.log_file {
        println!("  Log: {}", log_file);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let root = validate_root_url(&config.crawler.root_url)?;

    let stop = StopSignal::new();
    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tracing::warn!(
            "Interrupt received; finishing current page before stopping (Ctrl-C again to abort)"
        );
        ctrl_c_stop.raise();

        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::error!("Second interrupt received; aborting without saving results");
            std::process::exit(130);
        }
    });

    match crawl(&config, root, stop).await {
        Ok(report) => {
            tracing::info!("Crawl completed successfully");
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
