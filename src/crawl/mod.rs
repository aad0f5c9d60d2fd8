// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a website for email addresses.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-host restriction (never leaves the seed's host)
// - Page budget: a cap on how many distinct pages are fetched
// - A fixed pool of concurrent workers, plus a separate cap on in-flight
//   fetches
//
// Submodules:
// - frontier: the shared URL queue and its drain barrier
// - state: the visited set (claims) and the email set
// - fetch: HTTP fetching behind the `Fetch` trait
// - engine: the worker pool that ties it all together
// - report: what a finished crawl returns
// =============================================================================

mod engine;
mod fetch;
mod frontier;
mod report;
mod state;

use std::collections::HashSet;
use std::time::Duration;

use crate::config::CrawlConfig;
use crate::error::Result;

pub use engine::Crawler;
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use report::{CrawlReport, CrawlSummary};

// Crawls `seed_url` with default HTTP settings
//
// Parameters:
//   seed_url: where to start (also fixes the host the crawl stays on)
//   page_budget: maximum number of distinct pages to fetch (>= 1)
//   worker_count: number of concurrent workers and in-flight fetches (>= 1)
//
// Returns: the emails found and how long the crawl took. Fails only when the
// numbers are zero or the HTTP client can't be created; unreachable pages are
// logged and skipped.
pub async fn crawl_emails(
    seed_url: &str,
    page_budget: usize,
    worker_count: usize,
) -> Result<(HashSet<String>, Duration)> {
    let config = CrawlConfig::builder()
        .page_budget(page_budget)
        .worker_count(worker_count)
        .build()?;

    let report = Crawler::new(config)?.run(seed_url).await;
    Ok((report.emails, report.elapsed))
}
