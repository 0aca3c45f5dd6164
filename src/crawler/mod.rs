//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] seam
//! - HTML parsing and link extraction
//! - Dispatch bookkeeping and concurrency limiting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{Coordinator, CrawlReport};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use parser::extract_links;
pub use scheduler::{Discovery, Scheduler};

use crate::config::Config;
use crate::CrawlError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from configuration
/// 2. Dispatch the seed and every newly discovered in-scope URL
/// 3. Return the discovered URLs once nothing is left in flight
///
/// # Arguments
///
/// * `seed` - Absolute http(s) URL the crawl starts from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Discovered in-scope URLs in merge order
/// * `Err(CrawlError)` - The seed was unusable or the client could not be built
pub async fn crawl(seed: &str, config: &Config) -> Result<Vec<String>, CrawlError> {
    let report = crawl_with_cancellation(seed, config, CancellationToken::new()).await?;
    Ok(report.urls)
}

/// Runs a crawl over HTTP that stops early when `cancel` fires
pub async fn crawl_with_cancellation(
    seed: &str,
    config: &Config,
    cancel: CancellationToken,
) -> Result<CrawlReport, CrawlError> {
    let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent)?;
    let coordinator = Coordinator::new(Arc::new(fetcher), &config.crawler);
    coordinator.crawl_with_cancellation(seed, cancel).await
}
