//! Bounded-time fetching with a single automatic retry.

use std::time::Duration;

use common::{error::FetchError, search_result::SearchResponse, session::FetchRequest};
use tracing::warn;

use crate::{api::SearchApi, config::{FetcherConfig, MAX_ATTEMPTS}};

pub struct ResultFetcher<A> {
    api: A,
    timeout: Duration,
    max_attempts: u32,
}

impl<A: SearchApi> ResultFetcher<A> {
    pub fn new(api: A, config: &FetcherConfig) -> Self {
        Self { api, timeout: config.timeout, max_attempts: MAX_ATTEMPTS }
    }

    pub fn with_timeout(api: A, timeout: Duration) -> Self {
        Self { api, timeout, max_attempts: MAX_ATTEMPTS }
    }

    async fn attempt(&self, request: &FetchRequest) -> Result<SearchResponse, FetchError> {
        match tokio::time::timeout(self.timeout, self.api.search(request)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout { timeout_ms: self.timeout.as_millis() as u64 }),
        }
    }

    /// Fetches one page. Retryable failures are retried once, then returned.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<SearchResponse, FetchError> {
        let mut attempt = 1;
        loop {
            match self.attempt(request).await {
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    warn!("search request seq={} attempt {attempt} failed: {e}, retrying", request.ticket.seq);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
