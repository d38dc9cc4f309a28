// src/crawl/engine.rs
// =============================================================================
// The crawl engine: drives a crawl from the seed URL until the frontier
// is drained or the crawl is stopped.
//
// How it works:
// 1. Admit the seed at depth 0
// 2. Top up the worker pool from the frontier (at most `workers` at once)
//    - a task deeper than max_depth is recorded as Skipped, not fetched
//    - every other task gets a worker: fetch -> extract -> normalize ->
//      admit new links at depth + 1
// 3. Wait for the next worker to finish (or the stop signal) and record
//    its outcome
// 4. Repeat until nothing is queued and nothing is running
//
// A failing page only affects its own entry in the result. A worker that
// panics is logged and the crawl goes on.
// =============================================================================

use super::events::{CrawlEvent, EventSink, TracingSink};
use super::frontier::{CrawlTask, Frontier};
use super::normalize::{in_scope, is_eligible, normalize, parse_seed};
use super::result::{CrawlResult, Outcome, SkipReason};
use crate::config::{CrawlConfig, CrawlScope};
use crate::error::{EngineError, FetchError};
use crate::extract::{DocumentLinkExtractor, LinkExtractor};
use crate::fetch::{Fetcher, HttpFetcher, RetryingFetcher};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

type Joined = Result<(CrawlTask, std::thread::Result<Outcome>), JoinError>;

pub struct Crawler {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    sink: Arc<dyn EventSink>,
}

impl Crawler {
    pub fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            sink: Arc::new(TracingSink),
        }
    }

    /// A crawler that fetches over HTTP (with retries) and reads links from
    /// HTML and Markdown pages.
    pub fn with_http(config: CrawlConfig) -> Result<Self, EngineError> {
        let http = HttpFetcher::new(&config)?;
        let fetcher = RetryingFetcher::new(http, config.max_retries, config.retry_backoff);
        Ok(Self::new(
            config,
            Arc::new(fetcher),
            Arc::new(DocumentLinkExtractor::default()),
        ))
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `seed` until the frontier is drained.
    pub async fn crawl(&self, seed: &str) -> Result<CrawlResult, EngineError> {
        self.run(seed, CancellationToken::new()).await
    }

    /// Crawls from `seed` until the frontier is drained or `cancel` fires.
    ///
    /// On cancellation no further task is dispatched, in-flight fetches are
    /// abandoned, and everything recorded so far is returned together with
    /// the tasks that never got dispatched.
    pub async fn run(
        &self,
        seed: &str,
        cancel: CancellationToken,
    ) -> Result<CrawlResult, EngineError> {
        self.config.validate()?;
        let seed = parse_seed(seed)?;

        // Child token: the time limit stops this run without touching the
        // caller's token
        let cancel = cancel.child_token();
        let deadline = self.config.time_limit.map(|limit| Instant::now() + limit);

        let frontier = Arc::new(
            Frontier::new(self.config.order)
                .with_max_pages(self.config.max_pages, self.config.max_depth),
        );
        frontier.try_admit(seed.clone(), 0);

        let worker = Arc::new(Worker {
            fetcher: self.fetcher.clone(),
            extractor: self.extractor.clone(),
            sink: self.sink.clone(),
            frontier: frontier.clone(),
            seed: seed.clone(),
            scope: self.config.scope,
            request_timeout: self.config.request_timeout,
            cancel: cancel.clone(),
        });

        tracing::info!(
            seed = %seed,
            max_depth = self.config.max_depth,
            workers = self.config.workers,
            "Starting crawl"
        );

        let mut result = CrawlResult::new();
        let mut workers = JoinSet::new();

        loop {
            if cancel.is_cancelled() {
                break;
            }

            while workers.len() < self.config.workers {
                let Some(task) = frontier.dequeue() else {
                    break;
                };

                if task.depth > self.config.max_depth {
                    self.skip_too_deep(&task, &mut result);
                    frontier.complete();
                    continue;
                }

                self.sink.record(&CrawlEvent::Dispatched {
                    url: task.url.clone(),
                    depth: task.depth,
                });
                let worker = worker.clone();
                workers.spawn(async move {
                    let outcome = AssertUnwindSafe(worker.visit(task.clone()))
                        .catch_unwind()
                        .await;
                    (task, outcome)
                });
            }

            if frontier.is_drained() {
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = deadline_reached(deadline) => {
                    tracing::info!("Crawl time limit reached");
                    cancel.cancel();
                    break;
                }
                Some(joined) = workers.join_next() => {
                    finish_visit(joined, &frontier, &mut result);
                }
            }
        }

        // After a stop the remaining workers see the token and return quickly
        while let Some(joined) = workers.join_next().await {
            finish_visit(joined, &frontier, &mut result);
        }

        let cancelled = cancel.is_cancelled();
        let pending = frontier.drain_pending();
        result.finish(frontier.visited(), pending, cancelled);

        let summary = result.summary();
        tracing::info!(
            seed = %seed,
            succeeded = summary.succeeded,
            skipped = summary.skipped,
            failed = summary.failed,
            visited = result.visited().len(),
            cancelled,
            "Crawl finished"
        );

        Ok(result)
    }

    fn skip_too_deep(&self, task: &CrawlTask, result: &mut CrawlResult) {
        if !self.config.record_skipped {
            return;
        }
        let reason = SkipReason::DepthExceeded;
        result.record(task.url.as_str(), Outcome::Skipped { reason });
        self.sink.record(&CrawlEvent::Skipped {
            url: task.url.clone(),
            depth: task.depth,
            reason,
        });
    }
}

// Records a finished worker and releases its slot in the frontier.
fn finish_visit(joined: Joined, frontier: &Frontier, result: &mut CrawlResult) {
    frontier.complete();
    match joined {
        Ok((task, Ok(outcome))) => {
            result.record(task.url.as_str(), outcome);
        }
        Ok((task, Err(_panic))) => {
            tracing::error!(url = %task.url, depth = task.depth, "Worker panicked, page dropped");
        }
        Err(e) => {
            tracing::error!(error = %e, "Worker task failed");
        }
    }
}

async fn deadline_reached(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

// Everything a worker needs, shared by all workers of one run
struct Worker {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    sink: Arc<dyn EventSink>,
    frontier: Arc<Frontier>,
    seed: Url,
    scope: CrawlScope,
    request_timeout: Duration,
    cancel: CancellationToken,
}

// Depth of the links found on a page at `depth`
fn child_depth(depth: u32) -> u32 {
    depth.saturating_add(1)
}

impl Worker {
    async fn visit(&self, task: CrawlTask) -> Outcome {
        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            // Bounds any Fetcher, not just the reqwest one
            fetched = tokio::time::timeout(self.request_timeout, self.fetcher.fetch(&task.url)) => {
                Some(fetched.unwrap_or(Err(FetchError::Timeout)))
            }
        };

        let doc = match fetched {
            Some(Ok(doc)) => doc,
            Some(Err(error)) => {
                self.sink.record(&CrawlEvent::Failed {
                    url: task.url.clone(),
                    depth: task.depth,
                    error: error.clone(),
                });
                return Outcome::Failed { error };
            }
            None => {
                let reason = SkipReason::Cancelled;
                self.sink.record(&CrawlEvent::Skipped {
                    url: task.url.clone(),
                    depth: task.depth,
                    reason,
                });
                return Outcome::Skipped { reason };
            }
        };

        let links = self.extractor.extract_links(&doc);
        let mut admitted = 0;
        for href in &links {
            // Relative links resolve against where the page actually lives,
            // which differs from task.url after a redirect
            let Some(url) = normalize(&doc.url, href) else {
                continue;
            };
            if !is_eligible(&url) || !in_scope(self.scope, &self.seed, &url) {
                continue;
            }
            if self.frontier.try_admit(url, child_depth(task.depth)) {
                admitted += 1;
            }
        }

        self.sink.record(&CrawlEvent::Succeeded {
            url: task.url.clone(),
            depth: task.depth,
            links_found: links.len(),
            admitted,
        });
        Outcome::Success { depth: task.depth }
    }
}
