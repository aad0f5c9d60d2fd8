// src/crawl/state.rs
// =============================================================================
// The two shared sets of a crawl run:
// - VisitedSet: URLs a worker has claimed for fetching (the page count)
// - EmailSet: every distinct email found so far
//
// Each set sits behind its own Mutex. Every operation takes the lock once,
// does its work and releases it, so callers never hold a lock across .await.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// Outcome of trying to claim a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    // This worker now owns the URL and must fetch it
    Claimed,
    // Some worker claimed it earlier
    AlreadyVisited,
    // The page budget is used up
    BudgetExhausted,
}

#[derive(Debug)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
    budget: usize,
}

impl VisitedSet {
    pub fn new(budget: usize) -> Self {
        Self {
            urls: Mutex::new(HashSet::new()),
            budget,
        }
    }

    // Test-and-set under a single lock: membership check, budget check and
    // insert happen together, so a URL is claimed by at most one worker and
    // the set never grows past the budget.
    pub fn claim(&self, url: &str) -> Claim {
        let mut urls = lock(&self.urls);
        if urls.contains(url) {
            Claim::AlreadyVisited
        } else if urls.len() >= self.budget {
            Claim::BudgetExhausted
        } else {
            urls.insert(url.to_string());
            Claim::Claimed
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        lock(&self.urls).contains(url)
    }

    pub fn len(&self) -> usize {
        lock(&self.urls).len()
    }

    // Advisory: another worker may claim right after this returns true.
    pub fn has_room(&self) -> bool {
        self.len() < self.budget
    }

    pub fn into_inner(self) -> HashSet<String> {
        self.urls.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> HashSet<String> {
        lock(&self.urls).clone()
    }
}

#[derive(Debug, Default)]
pub struct EmailSet {
    emails: Mutex<HashSet<String>>,
}

impl EmailSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds one page's findings in a single step; other workers see either
    // none or all of them.
    pub fn merge(&self, found: HashSet<String>) {
        if found.is_empty() {
            return;
        }
        lock(&self.emails).extend(found);
    }

    pub fn snapshot(&self) -> HashSet<String> {
        lock(&self.emails).clone()
    }

    pub fn into_inner(self) -> HashSet<String> {
        self.emails.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_claim_once() {
        let visited = VisitedSet::new(10);
        assert_eq!(visited.claim("https://example.test/a"), Claim::Claimed);
        assert_eq!(visited.claim("https://example.test/a"), Claim::AlreadyVisited);
        assert!(visited.contains("https://example.test/a"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_claim_respects_budget() {
        let visited = VisitedSet::new(2);
        assert_eq!(visited.claim("a"), Claim::Claimed);
        assert!(visited.has_room());
        assert_eq!(visited.claim("b"), Claim::Claimed);
        assert!(!visited.has_room());
        assert_eq!(visited.claim("c"), Claim::BudgetExhausted);
        // a known URL is reported as visited even when the budget is full
        assert_eq!(visited.claim("a"), Claim::AlreadyVisited);
        assert_eq!(visited.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_have_one_winner() {
        let visited = Arc::new(VisitedSet::new(1000));

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let visited = Arc::clone(&visited);
                tokio::spawn(async move { visited.claim("https://example.test/contested") })
            })
            .collect();

        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap() == Claim::Claimed {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_never_exceed_budget() {
        let visited = Arc::new(VisitedSet::new(5));

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let visited = Arc::clone(&visited);
                tokio::spawn(async move { visited.claim(&format!("https://example.test/{i}")) })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(visited.len(), 5);
    }

    #[test]
    fn test_email_merge_accumulates() {
        let emails = EmailSet::new();
        emails.merge(["a@x.io".to_string(), "b@x.io".to_string()].into());
        emails.merge(["b@x.io".to_string(), "c@x.io".to_string()].into());
        emails.merge(HashSet::new());

        let all = emails.into_inner();
        assert_eq!(all.len(), 3);
        assert!(all.contains("c@x.io"));
    }
}
