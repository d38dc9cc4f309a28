// src/crawl/events.rs
// =============================================================================
// Observable crawl events.
//
// The engine reports every step to an EventSink. The default sink,
// TracingSink, turns them into structured `tracing` log lines; embedding
// apps can plug in their own sink (progress bars, metrics, tests).
// =============================================================================

use super::result::SkipReason;
use crate::error::FetchError;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A worker started fetching a URL
    Dispatched { url: Url, depth: u32 },
    /// The page was fetched; `admitted` of its `links_found` links were new
    Succeeded {
        url: Url,
        depth: u32,
        links_found: usize,
        admitted: usize,
    },
    Skipped { url: Url, depth: u32, reason: SkipReason },
    Failed { url: Url, depth: u32, error: FetchError },
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: &CrawlEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &CrawlEvent) {
        match event {
            CrawlEvent::Dispatched { url, depth } => {
                tracing::info!(url = %url, depth, "Crawling");
            }
            CrawlEvent::Succeeded {
                url,
                depth,
                links_found,
                admitted,
            } => {
                tracing::info!(url = %url, depth, links_found, admitted, "Crawled page");
            }
            CrawlEvent::Skipped { url, depth, reason } => {
                tracing::debug!(url = %url, depth, reason = ?reason, "Skipped page");
            }
            CrawlEvent::Failed { url, depth, error } => {
                tracing::warn!(url = %url, depth, error = %error, "Failed to fetch page");
            }
        }
    }
}
