// src/crawl/report.rs
// =============================================================================
// What a finished crawl hands back: the emails, the pages that were claimed,
// and how long it took. Sets are unordered; the sorted_* helpers give a stable
// order for printing.
// =============================================================================

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Normalized seed URL the crawl started from
    pub seed: String,
    /// Every distinct email-like string found
    pub emails: HashSet<String>,
    /// Every URL claimed for fetching, including ones whose fetch failed
    pub visited: HashSet<String>,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl CrawlReport {
    pub fn pages_visited(&self) -> usize {
        self.visited.len()
    }

    pub fn sorted_emails(&self) -> Vec<String> {
        sorted(&self.emails)
    }

    pub fn sorted_visited(&self) -> Vec<String> {
        sorted(&self.visited)
    }

    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            seed: self.seed.clone(),
            pages_visited: self.pages_visited(),
            emails: self.sorted_emails(),
            visited: self.sorted_visited(),
            elapsed_secs: self.elapsed.as_secs_f64(),
        }
    }
}

fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut items: Vec<String> = set.iter().cloned().collect();
    items.sort();
    items
}

// JSON shape of a report, as printed by `--json`
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub seed: String,
    pub pages_visited: usize,
    pub emails: Vec<String>,
    pub visited: Vec<String>,
    pub elapsed_secs: f64,
}
