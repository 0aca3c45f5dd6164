//! Output module for crawl results
//!
//! This module handles:
//! - Writing the discovered URL list, one per line
//! - Recording crawl statistics

pub mod stats;

pub use stats::{log_statistics, CrawlStatistics};

use crate::crawler::CrawlReport;
use std::io::Write;

/// Writes the result list of a crawl, one URL per line
///
/// With `unique` set, repeated URLs are written only at their first position.
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `unique` - Whether to drop repeated entries
/// * `writer` - Destination for the list
pub fn write_urls<W: Write>(report: &CrawlReport, unique: bool, mut writer: W) -> std::io::Result<()> {
    if unique {
        for url in report.unique_urls() {
            writeln!(writer, "{}", url)?;
        }
    } else {
        for url in &report.urls {
            writeln!(writer, "{}", url)?;
        }
    }
    writer.flush()
}
