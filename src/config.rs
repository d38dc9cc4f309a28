// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Every knob has a sensible default (see Default below) and a with_* method,
// so embedding code can write:
//
//   CrawlConfig::default().with_max_depth(3).with_workers(16)
//
// The CLI in src/cli.rs maps its flags onto the same struct.
// =============================================================================

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Order in which pending tasks leave the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// FIFO: all pages at depth D before any page at depth D+1
    #[default]
    BreadthFirst,
    /// LIFO: follow the most recently discovered link first
    DepthFirst,
}

/// Which discovered links are allowed into the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlScope {
    /// Any eligible http(s) link
    #[default]
    Any,
    /// Only links whose host equals the seed's host
    SameHost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    pub max_depth: u32,
    pub workers: usize,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub max_body_bytes: usize,
    pub max_redirects: usize,
    pub user_agent: String,
    pub order: TraversalOrder,
    pub scope: CrawlScope,
    /// Upper bound on admitted URLs within max_depth (the pages that get fetched)
    pub max_pages: Option<usize>,
    /// Wall-clock budget for the whole run
    pub time_limit: Option<Duration>,
    /// Record links admitted past max_depth as Skipped outcomes
    pub record_skipped: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            workers: 8,
            request_timeout: Duration::from_secs(10),
            max_retries: 0,
            retry_backoff: Duration::from_millis(250),
            max_body_bytes: 5 * 1024 * 1024,
            max_redirects: 5,
            user_agent: format!("link-walker/{}", env!("CARGO_PKG_VERSION")),
            order: TraversalOrder::BreadthFirst,
            scope: CrawlScope::Any,
            max_pages: None,
            time_limit: None,
            record_skipped: true,
        }
    }
}

impl CrawlConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_scope(mut self, scope: CrawlScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_record_skipped(mut self, record: bool) -> Self {
        self.record_skipped = record;
        self
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.workers == 0 {
            return Err(EngineError::NoWorkers);
        }
        if self.request_timeout.is_zero() {
            return Err(EngineError::ZeroTimeout);
        }
        if self.max_pages == Some(0) {
            return Err(EngineError::ZeroMaxPages);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workers, 8);
        assert_eq!(config.order, TraversalOrder::BreadthFirst);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = CrawlConfig::default().with_workers(0);
        assert!(matches!(config.validate(), Err(EngineError::NoWorkers)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CrawlConfig::default().with_request_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(EngineError::ZeroTimeout)));
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let config = CrawlConfig::default().with_max_pages(0);
        assert!(matches!(config.validate(), Err(EngineError::ZeroMaxPages)));
    }
}
