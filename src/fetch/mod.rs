// src/fetch/mod.rs
// =============================================================================
// This module retrieves page content for the crawler.
//
// Submodules:
// - http: the default Fetcher, built on reqwest
// - retry: a wrapper that retries transient failures of any Fetcher
//
// The engine only sees the Fetcher trait, so tests (and embedding apps)
// can plug in their own transport.
// =============================================================================

mod http;
mod retry;

pub use http::HttpFetcher;
pub use retry::RetryingFetcher;

use crate::error::FetchError;
use async_trait::async_trait;
use url::Url;

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Final URL after redirects; relative links resolve against this
    pub url: Url,
    pub body: String,
    pub content_type: Option<String>,
}

impl Document {
    pub fn new(url: Url, body: impl Into<String>) -> Self {
        Self {
            url,
            body: body.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Retrieves the document at a URL.
///
/// The engine bounds every call by `request_timeout` and watches the
/// cancellation signal while it waits, so a stalled fetch holds a worker slot
/// for at most one timeout.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Document, FetchError>;
}
