// src/crawl/frontier.rs
// =============================================================================
// The frontier: URLs we have seen, and the tasks still waiting to be crawled.
//
// How it works:
// 1. try_admit() marks a URL as seen AND queues it, in one locked step
// 2. dequeue() hands the next task to the engine and counts it as in flight
// 3. complete() is called when that task is fully processed
// 4. is_drained() is true once nothing is queued and nothing is in flight
//
// Step 1 being a single step is what keeps link cycles (A -> B -> A) from
// crawling forever and keeps two workers from fetching the same URL.
//
// Step 4 needs the in-flight count: an empty queue is not the end of the
// crawl while a worker may still discover new links.
// =============================================================================

use crate::config::TraversalOrder;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use url::Url;

/// A URL waiting to be crawled, and how many link hops it is from the seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlTask {
    pub url: Url,
    pub depth: u32,
}

#[derive(Debug, Default)]
struct State {
    visited: HashSet<String>,
    queue: VecDeque<CrawlTask>,
    in_flight: usize,
    // Admitted URLs at or below the fetch depth
    fetchable: usize,
}

#[derive(Debug)]
pub struct Frontier {
    state: Mutex<State>,
    order: TraversalOrder,
    max_pages: Option<usize>,
    max_depth: u32,
}

impl Frontier {
    pub fn new(order: TraversalOrder) -> Self {
        Self {
            state: Mutex::new(State::default()),
            order,
            max_pages: None,
            max_depth: u32::MAX,
        }
    }

    /// Stop admitting URLs at depth <= `max_depth` once `max_pages` of them
    /// have been admitted.
    ///
    /// URLs deeper than `max_depth` are never fetched, so they do not count
    /// toward the cap and are still admitted for dedup and reporting.
    pub fn with_max_pages(mut self, max_pages: Option<usize>, max_depth: u32) -> Self {
        self.max_pages = max_pages;
        self.max_depth = max_depth;
        self
    }

    // Every mutation is a single insert/push/pop, so a poisoned lock still
    // guards a consistent state
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks `url` as seen and queues it at `depth`.
    ///
    /// Returns false (and queues nothing) if the URL was already seen or the
    /// page cap is reached.
    pub fn try_admit(&self, url: Url, depth: u32) -> bool {
        let mut state = self.lock();
        let fetchable = depth <= self.max_depth;
        if let Some(max) = self.max_pages {
            if fetchable && state.fetchable >= max {
                return false;
            }
        }
        if !state.visited.insert(url.as_str().to_string()) {
            return false;
        }
        if fetchable {
            state.fetchable += 1;
        }
        state.queue.push_back(CrawlTask { url, depth });
        true
    }

    /// Takes the next task. The caller owns it until complete() is called.
    pub fn dequeue(&self) -> Option<CrawlTask> {
        let mut state = self.lock();
        let task = match self.order {
            TraversalOrder::BreadthFirst => state.queue.pop_front(),
            TraversalOrder::DepthFirst => state.queue.pop_back(),
        }?;
        state.in_flight += 1;
        Some(task)
    }

    /// Marks one dequeued task as finished.
    pub fn complete(&self) {
        let mut state = self.lock();
        debug_assert!(state.in_flight > 0, "complete() without dequeue()");
        state.in_flight = state.in_flight.saturating_sub(1);
    }

    pub fn is_drained(&self) -> bool {
        let state = self.lock();
        state.queue.is_empty() && state.in_flight == 0
    }

    pub fn pending_len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    pub fn visited_len(&self) -> usize {
        self.lock().visited.len()
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.lock().visited.contains(url.as_str())
    }

    /// A copy of every URL admitted so far.
    pub fn visited(&self) -> HashSet<String> {
        self.lock().visited.clone()
    }

    /// Removes all queued (not in-flight) tasks, in frontier order.
    pub fn drain_pending(&self) -> Vec<CrawlTask> {
        let mut state = self.lock();
        let mut tasks: Vec<CrawlTask> = state.queue.drain(..).collect();
        if self.order == TraversalOrder::DepthFirst {
            tasks.reverse();
        }
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_admit_twice() {
        let frontier = Frontier::new(TraversalOrder::BreadthFirst);
        assert!(frontier.try_admit(url("http://a.test/"), 0));
        assert!(!frontier.try_admit(url("http://a.test/"), 3));
        assert_eq!(frontier.pending_len(), 1);
        assert_eq!(frontier.visited_len(), 1);
    }

    #[test]
    fn test_breadth_first_order() {
        let frontier = Frontier::new(TraversalOrder::BreadthFirst);
        frontier.try_admit(url("http://a.test/1"), 1);
        frontier.try_admit(url("http://a.test/2"), 1);
        assert_eq!(frontier.dequeue().unwrap().url.path(), "/1");
        assert_eq!(frontier.dequeue().unwrap().url.path(), "/2");
        assert!(frontier.dequeue().is_none());
    }

    #[test]
    fn test_depth_first_order() {
        let frontier = Frontier::new(TraversalOrder::DepthFirst);
        frontier.try_admit(url("http://a.test/1"), 1);
        frontier.try_admit(url("http://a.test/2"), 1);
        frontier.try_admit(url("http://a.test/3"), 1);
        assert_eq!(frontier.dequeue().unwrap().url.path(), "/3");

        let rest: Vec<_> = frontier
            .drain_pending()
            .into_iter()
            .map(|t| t.url.path().to_string())
            .collect();
        assert_eq!(rest, vec!["/2", "/1"]);
    }

    #[test]
    fn test_drained_waits_for_in_flight() {
        let frontier = Frontier::new(TraversalOrder::BreadthFirst);
        frontier.try_admit(url("http://a.test/"), 0);
        assert!(!frontier.is_drained());

        let _task = frontier.dequeue().unwrap();
        // Queue is empty but the task may still discover links
        assert_eq!(frontier.pending_len(), 0);
        assert_eq!(frontier.in_flight(), 1);
        assert!(!frontier.is_drained());

        frontier.complete();
        assert!(frontier.is_drained());
    }

    #[test]
    fn test_max_pages_caps_admission() {
        let frontier =
            Frontier::new(TraversalOrder::BreadthFirst).with_max_pages(Some(2), 5);
        assert!(frontier.try_admit(url("http://a.test/1"), 0));
        assert!(frontier.try_admit(url("http://a.test/2"), 1));
        assert!(!frontier.try_admit(url("http://a.test/3"), 1));
        assert!(!frontier.is_visited(&url("http://a.test/3")));
    }

    #[test]
    fn test_max_pages_ignores_over_depth_urls() {
        let frontier =
            Frontier::new(TraversalOrder::BreadthFirst).with_max_pages(Some(2), 1);
        assert!(frontier.try_admit(url("http://a.test/"), 0));
        // Depth 2 is past max_depth: admitted but not counted
        assert!(frontier.try_admit(url("http://a.test/deep1"), 2));
        assert!(frontier.try_admit(url("http://a.test/deep2"), 2));
        assert!(frontier.try_admit(url("http://a.test/b"), 1));
        assert!(!frontier.try_admit(url("http://a.test/c"), 1));
        assert_eq!(frontier.visited_len(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_admission_single_winner() {
        let frontier = Arc::new(Frontier::new(TraversalOrder::BreadthFirst));
        let mut handles = Vec::new();
        for _ in 0..32 {
            let frontier = frontier.clone();
            handles.push(tokio::spawn(async move {
                frontier.try_admit(url("http://a.test/shared"), 1)
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(frontier.pending_len(), 1);
    }
}
