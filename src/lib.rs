// src/lib.rs
// =============================================================================
// mail-trawler: crawl one website and collect the email addresses on it.
//
// Modules:
// - extract: URL normalization, same-host link extraction, email matching
// - crawl: the concurrent crawl engine and the HTTP fetcher
// - config: crawl settings and their builder
// - error: setup errors
//
// Quick use:
//   let (emails, elapsed) = mail_trawler::crawl_emails("https://example.com", 100, 50).await?;
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;

pub use config::{CrawlConfig, CrawlConfigBuilder};
pub use crawl::{crawl_emails, CrawlReport, CrawlSummary, Crawler, Fetch, FetchError, HttpFetcher};
pub use error::{CrawlError, Result};
