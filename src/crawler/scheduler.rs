//! Dispatch bookkeeping for the crawl
//!
//! This module handles:
//! - The visited set, the only gate deciding whether a URL gets fetched
//! - Global concurrency limiting via a semaphore
//! - Tracking of fetch tasks that are running or not yet merged
//!
//! A [`Scheduler`] is owned by exactly one coordinator and is never shared,
//! so the visited-set check and insert happen in one `&mut self` call.

use crate::PageError;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// Result of visiting one URL, sent back to the coordinator when a task ends
#[derive(Debug)]
pub struct Discovery {
    /// The URL that was fetched
    pub url: String,

    /// In-scope absolute URLs found on the page, without repeats
    pub links: Vec<String>,

    /// Why the page produced no links, if it failed
    pub error: Option<PageError>,
}

impl Discovery {
    /// A successful visit
    pub fn found(url: String, links: Vec<String>) -> Self {
        Self {
            url,
            links,
            error: None,
        }
    }

    /// A failed visit; contributes an empty batch
    pub fn failed(url: String, error: PageError) -> Self {
        Self {
            url,
            links: Vec::new(),
            error: Some(error),
        }
    }
}

/// Scheduler owns the visited set and the pool of fetch tasks
///
/// Tasks are spawned immediately but wait for a semaphore permit before
/// doing any work, so at most `max_concurrent` fetches run at a time while
/// the coordinator stays free to merge results.
pub struct Scheduler {
    /// Every URL ever dispatched; entries are never removed
    visited: HashSet<String>,

    /// Global semaphore for limiting concurrent fetches
    permits: Arc<Semaphore>,

    /// Tasks that are running or whose discovery has not been collected
    tasks: JoinSet<Discovery>,

    /// Total tasks spawned over the crawl
    dispatched: usize,
}

impl Scheduler {
    /// Creates a scheduler allowing `max_concurrent` simultaneous fetches
    ///
    /// A limit of zero is treated as one.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            visited: HashSet::new(),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            tasks: JoinSet::new(),
            dispatched: 0,
        }
    }

    /// Records a URL as visited
    ///
    /// Returns `true` the first time a URL is seen and `false` afterwards.
    /// Only a `true` result may be followed by [`Scheduler::spawn`].
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string());
        true
    }

    /// Launches a fetch task behind the concurrency limit
    pub fn spawn<Fut>(&mut self, task: Fut)
    where
        Fut: Future<Output = Discovery> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        self.dispatched += 1;

        self.tasks.spawn(async move {
            // Acquisition only fails on a closed semaphore and this one is never closed
            let _permit = permits.acquire_owned().await;
            task.await
        });
    }

    /// Waits for the next task to finish
    ///
    /// Returns `None` once nothing is in flight. A task that panicked comes
    /// back as `Some(Err(_))`.
    pub async fn next_completed(&mut self) -> Option<Result<Discovery, JoinError>> {
        self.tasks.join_next().await
    }

    /// Number of tasks running or waiting to be merged
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Number of distinct URLs seen so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of tasks spawned so far
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Aborts every outstanding task and waits for them to stop
    pub async fn shutdown(&mut self) {
        self.tasks.shutdown().await;
    }
}
