// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::Parser;
use link_walker::{CrawlConfig, CrawlScope, TraversalOrder};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-walker",
    version,
    about = "Crawl a website up to a maximum depth and list every page visited",
    long_about = "link-walker starts at a URL, follows links up to --max-depth hops away, \
                  and reports which pages were crawled, skipped, or failed."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    pub seed: String,

    /// Maximum number of link hops from the seed
    ///
    /// Depth 0 = just the seed page
    /// Depth 1 = seed + every page it links to
    #[arg(long, default_value_t = 2)]
    pub max_depth: u32,

    /// Number of pages fetched concurrently (1 = one at a time)
    #[arg(long, default_value_t = 8)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Retries for timeouts, network errors and 5xx responses
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Stop admitting new URLs after this many
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Stop the whole crawl after this many seconds
    #[arg(long)]
    pub time_limit_secs: Option<u64>,

    /// Only follow links on the seed's host
    #[arg(long)]
    pub same_host: bool,

    /// Follow the newest link first instead of level by level
    #[arg(long)]
    pub depth_first: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show every URL with its outcome, not only crawled pages
    #[arg(long)]
    pub all: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig::default()
            .with_max_depth(self.max_depth)
            .with_workers(self.workers)
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
            .with_retries(self.retries, CrawlConfig::default().retry_backoff);

        if let Some(max_pages) = self.max_pages {
            config = config.with_max_pages(max_pages);
        }
        if let Some(secs) = self.time_limit_secs {
            config = config.with_time_limit(Duration::from_secs(secs));
        }
        if self.same_host {
            config = config.with_scope(CrawlScope::SameHost);
        }
        if self.depth_first {
            config = config.with_order(TraversalOrder::DepthFirst);
        }
        config
    }
}
