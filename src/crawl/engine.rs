// src/crawl/engine.rs
// =============================================================================
// The crawl engine: a fixed pool of worker tasks draining a shared frontier.
//
// How a run works:
// 1. The normalized seed URL goes into the frontier
// 2. `worker_count` tasks start, each looping:
//      pop URL -> claim it in the visited set -> fetch -> queue its links,
//      merge its emails -> mark the URL done
// 3. The engine waits for the frontier to drain (nothing queued, nothing in
//    flight), then tells the workers to stop and waits for them
// 4. The visited set and email set become the report
//
// Guarantees:
// - A URL is fetched at most once: claiming is a single test-and-set
// - At most `page_budget` URLs are claimed: the claim refuses once the
//   budget is used, so late duplicates in the queue are just discarded
// - At most `fetch_permits` fetches are in flight at any moment
// - Fetch failures never stop the crawl; the URL stays claimed and is skipped
// =============================================================================

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{watch, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::Instrument;

use super::fetch::{Fetch, HttpFetcher};
use super::frontier::Frontier;
use super::report::CrawlReport;
use super::state::{Claim, EmailSet, VisitedSet};
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::extract::{extract_emails, extract_links, normalize};

/// Crawls one site and collects the emails on it.
///
/// A `Crawler` can be reused: every call to [`Crawler::run`] starts from
/// empty state.
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetch>,
}

// State shared by the workers of a single run
struct Shared {
    frontier: Frontier,
    visited: VisitedSet,
    emails: EmailSet,
    fetch_permits: Semaphore,
    fetcher: Arc<dyn Fetch>,
}

impl Crawler {
    /// Creates a crawler that fetches pages over HTTP with reqwest.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a crawler that gets pages from `fetcher` instead.
    pub fn with_fetcher(config: CrawlConfig, fetcher: Arc<dyn Fetch>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `seed_url` until the frontier is exhausted.
    ///
    /// Never fails. If every fetch fails the report simply has no emails.
    pub async fn run(&self, seed_url: &str) -> CrawlReport {
        let started = Instant::now();
        let seed = normalize(seed_url);

        let shared = Arc::new(Shared {
            frontier: Frontier::new(),
            visited: VisitedSet::new(self.config.page_budget),
            emails: EmailSet::new(),
            fetch_permits: Semaphore::new(self.config.fetch_permits()),
            fetcher: Arc::clone(&self.fetcher),
        });

        tracing::info!(
            seed = %seed,
            page_budget = self.config.page_budget,
            workers = self.config.worker_count,
            fetch_permits = self.config.fetch_permits(),
            "starting crawl"
        );

        shared.frontier.push(seed.clone());

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut workers = JoinSet::new();
        for id in 0..self.config.worker_count {
            let span = tracing::debug_span!("worker", id);
            workers.spawn(worker(Arc::clone(&shared), stop_rx.clone()).instrument(span));
        }
        drop(stop_rx);

        // The drain barrier is what ends a run. Workers may also all leave on
        // their own once the budget is spent, which ends it just as well.
        tokio::select! {
            _ = shared.frontier.drained() => {
                tracing::debug!("frontier drained");
            }
            _ = async {
                while let Some(exit) = workers.join_next().await {
                    log_worker_exit(exit);
                }
            } => {
                tracing::debug!(unfinished = shared.frontier.unfinished(), "all workers exited");
            }
        }

        // Receivers may all be gone already; nothing to signal then
        let _ = stop_tx.send(true);
        while let Some(exit) = workers.join_next().await {
            log_worker_exit(exit);
        }

        let (visited, emails) = match Arc::try_unwrap(shared) {
            Ok(shared) => (shared.visited.into_inner(), shared.emails.into_inner()),
            Err(shared) => (shared.visited.snapshot(), shared.emails.snapshot()),
        };

        let elapsed = started.elapsed();
        tracing::info!(
            pages = visited.len(),
            emails = emails.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "crawl finished"
        );

        CrawlReport {
            seed,
            emails,
            visited,
            elapsed,
        }
    }
}

// One worker: pull, handle, repeat until stopped or out of work.
async fn worker(shared: Arc<Shared>, mut stop: watch::Receiver<bool>) {
    loop {
        if *stop.borrow() {
            break;
        }

        let url = tokio::select! {
            biased;
            // Err means the engine dropped the sender: stop as well
            _ = stop.changed() => break,
            url = shared.frontier.pop() => url,
        };

        {
            let _done = shared.frontier.done_on_drop();
            shared.handle(&url).await;
        }

        if shared.frontier.is_empty() && !shared.visited.has_room() {
            tracing::debug!("budget spent and frontier empty, exiting");
            break;
        }
    }
}

impl Shared {
    // Claim, fetch and extract one URL.
    async fn handle(&self, url: &str) {
        match self.visited.claim(url) {
            Claim::Claimed => {}
            Claim::AlreadyVisited => {
                tracing::trace!(url, "already visited");
                return;
            }
            Claim::BudgetExhausted => {
                tracing::trace!(url, "page budget spent, discarding");
                return;
            }
        }

        let body = {
            // The semaphore is never closed, so this only fails in theory
            let Ok(_permit) = self.fetch_permits.acquire().await else {
                return;
            };
            tracing::debug!(url, "fetching");
            self.fetcher.fetch(url).await
        };

        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => return,
        };

        let mut queued = 0usize;
        for link in extract_links(url, &body) {
            // advisory: another worker may claim between this check and the
            // pop, the claim itself enforces the budget
            if !self.visited.contains(&link) && self.visited.has_room() {
                self.frontier.push(link);
                queued += 1;
            }
        }

        let found = extract_emails(&body);
        tracing::debug!(url, queued, emails = found.len(), "page scanned");
        self.emails.merge(found);
    }
}

fn log_worker_exit(exit: std::result::Result<(), JoinError>) {
    if let Err(e) = exit {
        if e.is_panic() {
            tracing::error!(error = %e, "worker panicked");
        }
    }
}
