//! Statistics derived from a finished crawl
//!
//! This module turns a [`CrawlReport`] into summary figures and reports them
//! through the tracing subscriber, keeping stdout free for the URL list.

use crate::crawler::CrawlReport;
use std::collections::HashSet;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Entries in the result list, repeats included
    pub total_urls: usize,

    /// Distinct entries in the result list
    pub unique_urls: usize,

    /// Pages fetched and parsed successfully
    pub pages_fetched: usize,

    /// Pages that produced no links because they failed
    pub pages_failed: usize,

    /// Whether the crawl was cut short
    pub cancelled: bool,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Computes statistics for a report
    pub fn from_report(report: &CrawlReport) -> Self {
        let unique_urls = report
            .urls
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_urls: report.urls.len(),
            unique_urls,
            pages_fetched: report.pages_fetched,
            pages_failed: report.pages_failed,
            cancelled: report.cancelled,
            elapsed: report.elapsed,
        }
    }

    /// Pages attempted, successful or not
    pub fn pages_attempted(&self) -> usize {
        self.pages_fetched + self.pages_failed
    }

    /// Percentage of attempted pages that were fetched successfully
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_attempted();
        if attempted > 0 {
            (self.pages_fetched as f64 / attempted as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Attempted pages per second of wall-clock time
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_attempted() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Logs statistics at info level
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &CrawlStatistics) {
    if stats.cancelled {
        tracing::warn!("Crawl was cancelled; results are partial");
    }

    tracing::info!(
        "Discovered {} URLs ({} unique)",
        stats.total_urls,
        stats.unique_urls
    );
    tracing::info!(
        "Success Rate: {:.1}% ({} / {} pages fetched, {} failed)",
        stats.success_rate(),
        stats.pages_fetched,
        stats.pages_attempted(),
        stats.pages_failed
    );
    tracing::info!(
        "Elapsed: {:.2}s ({:.1} pages/s)",
        stats.elapsed.as_secs_f64(),
        stats.pages_per_second()
    );
}
