use crate::CrawlError;
use url::Url;

/// The scheme and host pair that bounds a crawl
///
/// An origin is derived once from the seed URL and never changes afterwards.
/// A non-default port is considered part of the host, so
/// `http://localhost:8080` and `http://localhost:9090` are different origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
    prefix: String,
    root: Url,
}

impl Origin {
    /// Derives the origin of an absolute URL
    ///
    /// Returns `None` if the URL has no host (e.g. `mailto:` or `data:` URLs).
    ///
    /// # Examples
    ///
    /// ```
    /// use sitewalk::url::Origin;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://Example.com/docs/index.html").unwrap();
    /// let origin = Origin::of(&url).unwrap();
    /// assert_eq!(origin.as_str(), "https://example.com");
    /// ```
    pub fn of(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_lowercase();
        let prefix = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };
        let root = Url::parse(&format!("{}/", prefix)).ok()?;

        Some(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port_or_known_default(),
            prefix,
            root,
        })
    }

    /// The `scheme://host[:port]` form used for prefix matching
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if the URL shares this origin's scheme, host and port
    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str().map(|h| h.eq_ignore_ascii_case(&self.host)) == Some(true)
            && url.port_or_known_default() == self.port
    }

    /// Resolves a root-relative reference against the origin
    pub fn join(&self, reference: &str) -> Option<Url> {
        self.root.join(reference).ok()
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Parses a seed URL, rejecting anything a crawl cannot start from
///
/// The seed must be absolute, use `http` or `https`, and carry a host.
pub fn parse_seed(seed: &str) -> Result<Url, CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidSeedUrl {
        url: seed.to_string(),
        reason,
    };

    let url = Url::parse(seed.trim()).map_err(|e| invalid(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}
