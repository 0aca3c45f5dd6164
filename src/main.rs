//! Sitewalk main entry point
//!
//! This is the command-line interface for the Sitewalk site crawler.

use anyhow::Context;
use clap::Parser;
use sitewalk::config::{load_config, validate, Config};
use sitewalk::crawler::crawl_with_cancellation;
use sitewalk::output::{log_statistics, write_urls, CrawlStatistics};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sitewalk: a same-origin site crawler
///
/// Sitewalk starts at a seed URL, follows anchor links that stay on the
/// seed's scheme and host, and prints every page it discovers.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A same-origin breadth-first site crawler", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start crawling from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of simultaneous fetches
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Crawler name sent in the User-Agent header
    #[arg(long, value_name = "NAME")]
    user_agent: Option<String>,

    /// Stop the crawl after this many seconds and print partial results
    #[arg(long, value_name = "SECS")]
    max_duration: Option<u64>,

    /// Print each discovered URL only once
    #[arg(short, long)]
    unique: bool,

    /// Write URLs to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let cancel = CancellationToken::new();
    spawn_cancel_triggers(&cancel, cli.max_duration);

    let report = match crawl_with_cancellation(&cli.seed, &config, cancel).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_urls(&report, cli.unique, BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("URLs written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_urls(&report, cli.unique, stdout.lock()).context("Failed to write URLs")?;
        }
    }

    log_statistics(&CrawlStatistics::from_report(&report));

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the URL list.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if given and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout = timeout;
        config.crawler.connect_timeout = config.crawler.connect_timeout.min(timeout);
    }
    if let Some(name) = &cli.user_agent {
        config.user_agent.crawler_name = name.clone();
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Cancels the crawl on Ctrl-C or once `max_duration` seconds have passed
fn spawn_cancel_triggers(cancel: &CancellationToken, max_duration: Option<u64>) {
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            token.cancel();
        }
    });

    if let Some(secs) = max_duration {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            tracing::warn!("Maximum duration of {}s reached, stopping crawl", secs);
            token.cancel();
        });
    }
}
