// src/crawl/frontier.rs
// =============================================================================
// The frontier: a FIFO queue of URLs waiting to be fetched, shared by every
// worker.
//
// How it works:
// 1. push() appends a URL and bumps the "unfinished" counter
// 2. pop() waits until a URL is available and hands it out
// 3. After handling a URL, the worker calls task_done(), which lowers the
//    counter
// 4. drained() resolves once the counter reaches zero: nothing queued and
//    nothing being worked on
//
// The queue carries no uniqueness guarantee. The same URL may be queued many
// times; the visited set decides at claim time whether it is fetched.
//
// Locking: a std Mutex guards the queue and the counter together. It is never
// held across an .await, so it can't block the runtime.
// =============================================================================

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    queue: VecDeque<String>,
    // pushed but not yet marked done
    unfinished: usize,
}

#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<Inner>,
    item_ready: Notify,
    drained: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Appends a URL and wakes one waiting worker.
    pub fn push(&self, url: String) {
        {
            let mut inner = self.lock();
            inner.queue.push_back(url);
            inner.unfinished += 1;
        }
        self.item_ready.notify_one();
    }

    // Removes a URL without waiting. Every URL returned here must later be
    // matched by a task_done() call.
    pub fn try_pop(&self) -> Option<String> {
        let (url, more) = {
            let mut inner = self.lock();
            let url = inner.queue.pop_front();
            (url, !inner.queue.is_empty())
        };
        // notify_one keeps at most one stored wakeup, so pass it on while
        // there is still work for another waiter
        if url.is_some() && more {
            self.item_ready.notify_one();
        }
        url
    }

    // Waits for the next URL.
    //
    // Cancel-safe: if the future is dropped while waiting, no URL is lost.
    pub async fn pop(&self) -> String {
        loop {
            if let Some(url) = self.try_pop() {
                return url;
            }
            self.item_ready.notified().await;
        }
    }

    // Marks one popped URL as fully handled.
    pub fn task_done(&self) {
        let now_drained = {
            let mut inner = self.lock();
            debug_assert!(inner.unfinished > 0, "task_done called more times than push");
            inner.unfinished = inner.unfinished.saturating_sub(1);
            inner.unfinished == 0
        };
        if now_drained {
            self.drained.notify_waiters();
        }
    }

    // Calls task_done() when dropped, including when the worker handling
    // the URL panics. Without it a lost task_done() would hold drained()
    // open forever.
    pub fn done_on_drop(&self) -> DoneGuard<'_> {
        DoneGuard { frontier: self }
    }

    // Resolves when every pushed URL has been marked done.
    pub async fn drained(&self) {
        loop {
            let notified = self.drained.notified();
            tokio::pin!(notified);
            // register before checking, so a task_done() racing with the
            // check can't be missed
            notified.as_mut().enable();

            if self.lock().unfinished == 0 {
                return;
            }
            notified.await;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    pub fn unfinished(&self) -> usize {
        self.lock().unfinished
    }
}

#[must_use = "dropping the guard immediately marks the URL done"]
pub struct DoneGuard<'a> {
    frontier: &'a Frontier,
}

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        self.frontier.task_done();
    }
}
