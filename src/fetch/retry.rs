// src/fetch/retry.rs
// =============================================================================
// Retry policy around any Fetcher.
//
// Transient failures (see FetchError::is_transient) are retried with
// exponential backoff: backoff, 2 * backoff, 4 * backoff, ...
// Permanent failures and successes are returned on the first attempt.
// =============================================================================

use super::{Document, Fetcher};
use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

pub struct RetryingFetcher<F> {
    inner: F,
    max_retries: u32,
    backoff: Duration,
}

impl<F: Fetcher> RetryingFetcher<F> {
    pub fn new(inner: F, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for RetryingFetcher<F> {
    async fn fetch(&self, url: &Url) -> Result<Document, FetchError> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch(url).await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.backoff.saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    tracing::debug!(
                        url = %url,
                        attempt,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying fetch"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}
