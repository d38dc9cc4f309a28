// src/lib.rs
// =============================================================================
// link-walker: a bounded-depth, concurrent web crawler.
//
// Give it a seed URL and a maximum depth; it fetches pages, follows their
// links breadth-first, and returns the outcome for every URL it dealt with.
//
//   let crawler = Crawler::with_http(CrawlConfig::default().with_max_depth(2))?;
//   let result = crawler.crawl("https://example.com").await?;
//   for url in result.successful_urls() {
//       println!("{}", url);
//   }
//
// Modules:
// - crawl: the engine, frontier, URL normalization and results
// - fetch: the Fetcher trait and the reqwest implementation
// - extract: the LinkExtractor trait and HTML/Markdown extractors
// - config: crawl settings
// - error: fetch failures and fatal engine errors
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;

pub use config::{CrawlConfig, CrawlScope, TraversalOrder};
pub use crawl::{CrawlEvent, CrawlResult, CrawlSummary, CrawlTask, Crawler, EventSink, Outcome, SkipReason};
pub use error::{EngineError, FetchError};
pub use extract::{DocumentLinkExtractor, LinkExtractor};
pub use fetch::{Document, Fetcher};
