//! Sitewalk: a same-origin breadth-first site crawler
//!
//! This crate walks a web site from a seed address and returns every page
//! reachable through anchor links that shares the seed's scheme and host.
//! Pages are fetched concurrently under a bounded task pool while a single
//! coordinator owns the visited set and the result list.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Only failures that prevent a crawl from starting surface here. Problems
/// with individual pages are reported as [`PageError`] and absorbed by the
/// coordinator.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to turn a single URL into a batch of links
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unable to parse {url}: {message}")]
    Parse { url: String, message: String },
}

impl PageError {
    /// The URL this failure belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Http { url, .. }
            | Self::Parse { url, .. } => url,
        }
    }

    /// Returns true for network, timeout and status failures
    pub fn is_fetch_failure(&self) -> bool {
        !self.is_parse_failure()
    }

    /// Returns true when the page arrived but its content was unusable
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for single page operations
pub type PageResult<T> = std::result::Result<T, PageError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, CrawlReport, HttpFetcher, PageFetcher};
pub use crate::url::{filter_links, resolve_in_scope, Origin};
