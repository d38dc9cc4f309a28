// src/crawl/result.rs
// =============================================================================
// What a crawl produces: one Outcome per URL the engine dealt with.
// =============================================================================

use super::frontier::CrawlTask;
use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Admitted one hop past max_depth; never fetched
    DepthExceeded,
    /// Fetch abandoned because the crawl was stopped
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success { depth: u32 },
    Skipped { reason: SkipReason },
    Failed { error: FetchError },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Final output of one run. Sorted by URL so output is stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlResult {
    outcomes: BTreeMap<String, Outcome>,
    visited: BTreeSet<String>,
    pending: Vec<CrawlTask>,
    cancelled: bool,
}

impl CrawlResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for a URL. The first outcome for a URL wins;
    /// returns false if one was already recorded.
    pub(crate) fn record(&mut self, url: &str, outcome: Outcome) -> bool {
        if self.outcomes.contains_key(url) {
            return false;
        }
        self.outcomes.insert(url.to_string(), outcome);
        true
    }

    pub(crate) fn finish(
        &mut self,
        visited: HashSet<String>,
        pending: Vec<CrawlTask>,
        cancelled: bool,
    ) {
        self.visited = visited.into_iter().collect();
        self.pending = pending;
        self.cancelled = cancelled;
    }

    pub fn get(&self, url: &str) -> Option<&Outcome> {
        self.outcomes.get(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.outcomes.iter().map(|(url, outcome)| (url.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// URLs that were fetched successfully.
    pub fn successful_urls(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, outcome)| outcome.is_success())
            .map(|(url, _)| url)
    }

    /// Every URL admitted to the visited set, fetched or not.
    pub fn visited(&self) -> &BTreeSet<String> {
        &self.visited
    }

    /// Tasks still queued when the crawl was cancelled; never dispatched.
    pub fn pending(&self) -> &[CrawlTask] {
        &self.pending
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn summary(&self) -> CrawlSummary {
        let mut summary = CrawlSummary::default();
        for outcome in self.outcomes.values() {
            match outcome {
                Outcome::Success { .. } => summary.succeeded += 1,
                Outcome::Skipped { .. } => summary.skipped += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_outcome_wins() {
        let mut result = CrawlResult::new();
        assert!(result.record("http://a.test/", Outcome::Success { depth: 0 }));
        assert!(!result.record(
            "http://a.test/",
            Outcome::Failed { error: FetchError::Timeout }
        ));
        assert_eq!(result.get("http://a.test/"), Some(&Outcome::Success { depth: 0 }));
    }

    #[test]
    fn test_summary_and_successful_urls() {
        let mut result = CrawlResult::new();
        result.record("http://a.test/", Outcome::Success { depth: 0 });
        result.record("http://b.test/", Outcome::Failed { error: FetchError::Timeout });
        result.record(
            "http://c.test/",
            Outcome::Skipped { reason: SkipReason::DepthExceeded },
        );

        assert_eq!(
            result.summary(),
            CrawlSummary { succeeded: 1, skipped: 1, failed: 1 }
        );
        assert_eq!(result.successful_urls().collect::<Vec<_>>(), vec!["http://a.test/"]);
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(Outcome::Failed {
            error: FetchError::HttpStatus { code: 500 },
        })
        .unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["error"]["kind"], "http_status");

        let json = serde_json::to_value(Outcome::Skipped {
            reason: SkipReason::DepthExceeded,
        })
        .unwrap();
        assert_eq!(json["reason"], "depth_exceeded");
    }
}
