//! # Crawl Configuration
//!
//! Knobs for a single crawl run: how many pages may be fetched, how many
//! workers pull from the frontier, how many fetches may be in flight at once,
//! and how the HTTP client behaves.
//!
//! `CrawlConfig::default()` gives values suitable for a small site. Use
//! `CrawlConfig::builder()` to change them; `build()` validates the result.

use std::time::Duration;

use crate::error::{CrawlError, Result};

/// Configuration for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of distinct pages to fetch
    pub page_budget: usize,

    /// Number of worker tasks pulling URLs from the frontier
    pub worker_count: usize,

    /// Maximum simultaneous in-flight fetches; `None` means `worker_count`
    pub max_concurrent_fetches: Option<usize>,

    /// Timeout for a single request, connect to last body byte
    pub request_timeout: Duration,

    /// Maximum redirects followed per request
    pub max_redirects: usize,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            page_budget: 100,
            worker_count: 50,
            max_concurrent_fetches: None,
            request_timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: format!("mail-trawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    /// Start a builder from the default configuration
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::new()
    }

    /// Size of the fetch permit pool
    pub fn fetch_permits(&self) -> usize {
        self.max_concurrent_fetches.unwrap_or(self.worker_count)
    }

    /// Check that every count is positive
    pub fn validate(&self) -> Result<()> {
        if self.page_budget == 0 {
            return Err(CrawlError::InvalidConfig(
                "page budget must be at least 1".to_string(),
            ));
        }
        if self.worker_count == 0 {
            return Err(CrawlError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.fetch_permits() == 0 {
            return Err(CrawlError::InvalidConfig(
                "max concurrent fetches must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "request timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for CrawlConfig
#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlConfig::default(),
        }
    }

    /// Set the maximum number of pages to fetch
    pub fn page_budget(mut self, page_budget: usize) -> Self {
        self.config.page_budget = page_budget;
        self
    }

    /// Set the number of workers
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.config.worker_count = worker_count;
        self
    }

    /// Bound in-flight fetches separately from the worker count
    pub fn max_concurrent_fetches(mut self, max: usize) -> Self {
        self.config.max_concurrent_fetches = Some(max);
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the redirect limit
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.config.max_redirects = max_redirects;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<CrawlConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
