//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - Single-attempt GET requests for page content
//! - Error classification into [`PageError`]

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::PageError;
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;

/// Retrieves the content behind an absolute URL
///
/// Implementations are shared across every concurrent fetch task, so they must
/// not rely on per-call mutable state.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs one fetch attempt and returns the page body
    async fn fetch(&self, url: &str) -> Result<String, PageError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::{CrawlerConfig, UserAgentConfig};
/// use sitewalk::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a shared `reqwest` client
///
/// The client pools connections internally and is safe to use from many tasks
/// at once; no lock is taken around requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from crawler and user agent configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(crawler, user_agent)?))
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL once
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx with HTML or no Content-Type | `Ok(body)` |
    /// | 2xx with another Content-Type | `PageError::Parse` |
    /// | Non-2xx status | `PageError::Status` |
    /// | Timeout | `PageError::Timeout` |
    /// | Connection refused / DNS / TLS | `PageError::Connect` |
    ///
    /// Redirects are followed by the client's default policy; there is no retry.
    async fn fetch(&self, url: &str) -> Result<String, PageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html_content_type(content_type) {
                return Err(PageError::Parse {
                    url: url.to_string(),
                    message: format!("unsupported content type {}", content_type),
                });
            }
        }

        response.text().await.map_err(|e| PageError::Parse {
            url: url.to_string(),
            message: format!("failed to read body: {}", e),
        })
    }
}

/// Returns true for content types the link extractor understands
fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "text/html" || mime == "application/xhtml+xml"
}

/// Maps a transport error onto the page error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> PageError {
    if error.is_timeout() {
        PageError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        PageError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        PageError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
