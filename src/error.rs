//! Error types for the crawler library
//!
//! A crawl itself never fails: unreachable pages are logged and skipped.
//! The only errors a caller can see come from setting a crawl up.

use thiserror::Error;

/// Error type for setting up a crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be built (TLS backend, proxy settings, ...)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result alias for crawler setup
pub type Result<T> = std::result::Result<T, CrawlError>;
