// src/crawl/mod.rs
// =============================================================================
// This module handles crawling.
//
// Features:
// - Breadth-first (or depth-first) traversal from a seed URL
// - Depth limit, with over-depth links reported as skipped
// - Each URL fetched at most once, even with many concurrent workers
// - Per-page failure isolation and a stop signal
//
// Submodules:
// - normalize: canonical URLs and crawl eligibility
// - frontier: visited set + task queue with atomic admission
// - engine: the worker pool that drives a crawl
// - result: per-URL outcomes
// - events: observable crawl events and the tracing sink
// =============================================================================

mod engine;
mod events;
mod frontier;
pub mod normalize;
mod result;

pub use engine::Crawler;
pub use events::{CrawlEvent, EventSink, TracingSink};
pub use frontier::{CrawlTask, Frontier};
pub use result::{CrawlResult, CrawlSummary, Outcome, SkipReason};
