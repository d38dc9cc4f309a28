// src/error.rs
// =============================================================================
// Error types for the crawler library.
//
// There are two families:
// - FetchError: something went wrong with ONE page. It is recorded in the
//   crawl result for that URL and the crawl carries on.
// - EngineError: the crawl cannot start at all (bad seed, bad config).
//
// A link that fails validation (mailto:, javascript:, ...) is neither. It
// is simply filtered out.
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why fetching a single page failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// The request did not finish within the per-request timeout
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status code
    #[error("HTTP {code}")]
    HttpStatus { code: u16 },

    /// Connection, DNS, TLS or protocol failure
    #[error("network error: {message}")]
    Network { message: String },

    /// The response body is larger than the configured limit
    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl FetchError {
    /// Whether trying the same request again could succeed.
    ///
    /// Timeouts, network failures, 429 and 5xx responses are transient.
    /// Other status codes and oversized bodies will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Network { .. } => true,
            FetchError::HttpStatus { code } => *code == 429 || (500..600).contains(code),
            FetchError::TooLarge { .. } => false,
        }
    }
}

/// Conditions that abort a crawl before it starts.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("max pages must be at least 1 when set")]
    ZeroMaxPages,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
