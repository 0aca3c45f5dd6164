//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the merge loop that drives a crawl:
//! - Deriving the origin from the seed URL
//! - Dispatching one fetch task per newly discovered URL
//! - Merging each task's discovery batch into the result list
//! - Detecting quiescence (nothing in flight) or cancellation
//!
//! All shared crawl state (visited set, result list, in-flight tasks) lives in
//! the coordinator's own stack frame. Fetch tasks never touch it directly; they
//! only return a [`Discovery`] that the coordinator collects.

use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{Discovery, Scheduler};
use crate::crawler::PageFetcher;
use crate::config::CrawlerConfig;
use crate::url::{filter_links, parse_seed, Origin};
use crate::CrawlError;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Outcome of a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed as dispatched (parsed form)
    pub seed: String,

    /// Discovered in-scope URLs in merge order; may contain repeats
    pub urls: Vec<String>,

    /// Pages fetched and parsed successfully
    pub pages_fetched: usize,

    /// Pages that failed to fetch or parse, including panicked tasks
    pub pages_failed: usize,

    /// Whether the crawl stopped because of cancellation
    pub cancelled: bool,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlReport {
    /// The result list with repeats removed, keeping first-seen order
    pub fn unique_urls(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .cloned()
            .collect()
    }
}

/// Main crawler coordinator structure
///
/// A coordinator holds no per-crawl state, so one instance can run several
/// crawls, even concurrently, each with fresh bookkeeping.
#[derive(Clone)]
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    max_concurrent: usize,
}

impl Coordinator {
    /// Creates a coordinator using the concurrency limit from configuration
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlerConfig) -> Self {
        Self::with_concurrency(fetcher, config.max_concurrent_fetches as usize)
    }

    /// Creates a coordinator with an explicit concurrency limit
    pub fn with_concurrency(fetcher: Arc<dyn PageFetcher>, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Crawls every page reachable from `seed` within its origin
    ///
    /// Returns the discovered in-scope URLs. The only error is an unusable
    /// seed; failing pages just contribute nothing.
    pub async fn crawl(&self, seed: &str) -> Result<Vec<String>, CrawlError> {
        let report = self
            .crawl_with_cancellation(seed, CancellationToken::new())
            .await?;
        Ok(report.urls)
    }

    /// Crawls like [`Coordinator::crawl`] but stops early when `cancel` fires
    ///
    /// On cancellation no further tasks are dispatched, outstanding tasks are
    /// aborted and the partial result list is returned with
    /// [`CrawlReport::cancelled`] set.
    pub async fn crawl_with_cancellation(
        &self,
        seed: &str,
        cancel: CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        let seed_url = parse_seed(seed)?;
        let origin = Origin::of(&seed_url)
            .map(Arc::new)
            .ok_or_else(|| CrawlError::InvalidSeedUrl {
                url: seed.to_string(),
                reason: "missing host".to_string(),
            })?;

        tracing::info!(
            "Starting crawl of {} (max {} concurrent fetches)",
            origin,
            self.max_concurrent
        );

        let start_time = Instant::now();
        let mut scheduler = Scheduler::new(self.max_concurrent);
        let mut urls = Vec::new();
        let mut pages_fetched = 0;
        let mut pages_failed = 0;
        let mut cancelled = false;

        self.dispatch(&mut scheduler, &origin, seed_url.to_string());

        while scheduler.in_flight() > 0 {
            let completed = tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }

                completed = scheduler.next_completed() => completed,
            };

            let discovery = match completed {
                Some(Ok(discovery)) => discovery,
                Some(Err(e)) => {
                    tracing::warn!("Fetch task ended abnormally: {}", e);
                    pages_failed += 1;
                    continue;
                }
                None => break,
            };

            match &discovery.error {
                None => pages_fetched += 1,
                Some(error) => {
                    tracing::debug!("Skipping {}: {}", discovery.url, error);
                    pages_failed += 1;
                }
            }

            for link in discovery.links {
                urls.push(link.clone());
                self.dispatch(&mut scheduler, &origin, link);
            }
        }

        if cancelled {
            tracing::info!(
                "Crawl cancelled, aborting {} in-flight fetches",
                scheduler.in_flight()
            );
            scheduler.shutdown().await;
        }

        let elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl of {} finished: {} URLs discovered, {} pages dispatched, {} failed in {:?}",
            origin,
            urls.len(),
            scheduler.dispatched(),
            pages_failed,
            elapsed
        );

        Ok(CrawlReport {
            seed: seed_url.to_string(),
            urls,
            pages_fetched,
            pages_failed,
            cancelled,
            elapsed,
        })
    }

    /// Launches a fetch task for `url` unless it was dispatched before
    fn dispatch(&self, scheduler: &mut Scheduler, origin: &Arc<Origin>, url: String) {
        if !scheduler.mark_visited(&url) {
            tracing::trace!("Already dispatched: {}", url);
            return;
        }

        tracing::debug!("Dispatching {}", url);

        let fetcher = Arc::clone(&self.fetcher);
        let origin = Arc::clone(origin);
        scheduler.spawn(async move { process_url(fetcher.as_ref(), &origin, url).await });
    }
}

/// Fetches one page and turns it into a batch of in-scope links
///
/// Fetch and parse failures are folded into an empty batch.
async fn process_url(fetcher: &dyn PageFetcher, origin: &Origin, url: String) -> Discovery {
    match fetcher.fetch(&url).await {
        Ok(body) => {
            let raw_links = extract_links(&body);
            let links = filter_links(origin, &raw_links);
            tracing::trace!(
                "{}: {} anchors, {} in scope",
                url,
                raw_links.len(),
                links.len()
            );
            Discovery::found(url, links)
        }
        Err(error) => Discovery::failed(url, error),
    }
}
