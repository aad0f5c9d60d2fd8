// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: give it a URL, it crawls that site and prints
// the email addresses it found. Every flag maps onto a CrawlConfig field.
// =============================================================================

use std::time::Duration;

use clap::Parser;
use mail_trawler::{CrawlConfig, Result};

#[derive(Parser, Debug)]
#[command(
    name = "mail-trawler",
    version,
    about = "Crawl a website and collect the email addresses it mentions",
    long_about = "mail-trawler starts at a URL, follows links on the same host breadth-first \
                  until it runs out of links or hits the page budget, and prints every \
                  email-like string found in the pages it fetched."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    ///
    /// Only links on this URL's host are followed.
    pub seed_url: String,

    /// Maximum number of distinct pages to fetch
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: u64,

    /// Number of concurrent workers
    #[arg(long, short = 'w', default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: u64,

    /// Maximum simultaneous requests (defaults to the worker count)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_concurrent_fetches: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Output results in JSON format instead of a list
    #[arg(long)]
    pub json: bool,

    /// Log every fetch and skip (same as RUST_LOG=mail_trawler=debug)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    // Turns the parsed flags into a validated crawl configuration
    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        let mut builder = CrawlConfig::builder()
            .page_budget(self.max_pages as usize)
            .worker_count(self.workers as usize)
            .request_timeout(Duration::from_secs(self.timeout_secs));

        if let Some(max) = self.max_concurrent_fetches {
            builder = builder.max_concurrent_fetches(max as usize);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mail-trawler", "https://example.test"]).unwrap();
        let config = cli.crawl_config().unwrap();

        assert_eq!(cli.seed_url, "https://example.test");
        assert_eq!(config.page_budget, 100);
        assert_eq!(config.worker_count, 50);
        assert_eq!(config.fetch_permits(), 50);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!cli.json);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "mail-trawler",
            "https://example.test",
            "--max-pages",
            "10",
            "-w",
            "4",
            "--max-concurrent-fetches",
            "2",
            "--timeout-secs",
            "3",
            "--json",
        ])
        .unwrap();
        let config = cli.crawl_config().unwrap();

        assert_eq!(config.page_budget, 10);
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.fetch_permits(), 2);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(cli.json);
    }

    #[test]
    fn test_zero_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["mail-trawler", "https://example.test", "--max-pages", "0"]).is_err());
        assert!(Cli::try_parse_from(["mail-trawler", "https://example.test", "--workers", "0"]).is_err());
    }

    #[test]
    fn test_seed_required() {
        assert!(Cli::try_parse_from(["mail-trawler"]).is_err());
    }
}
