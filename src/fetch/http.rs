//! Direct HTTP fetch backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio_retry::RetryIf;

use super::{FetchOutcome, FetchStatus, PageFetcher};
use crate::config::{Config, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{
    categorize_reqwest_error, get_retry_strategy, FetchFailure, InitializationError,
};
use crate::initialization::init_client;

/// Fetches pages with a shared `reqwest::Client`.
///
/// Transient failures (connect errors, timeouts, 429/502/503/504) are retried
/// `max_retries` times with a fixed delay. Anything else is returned on the
/// first attempt.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    max_retries: usize,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(client: Arc<reqwest::Client>, max_retries: usize, retry_delay: Duration) -> Self {
        Self {
            client,
            max_retries,
            retry_delay,
        }
    }

    /// Builds the client and retry policy from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self::new(client, config.max_retries, config.retry_delay()))
    }

    /// One GET attempt.
    ///
    /// Returns `(final_url, body)` on a 2xx response with a non-empty body.
    async fn attempt(&self, url: &str) -> Result<(String, String), FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;

        let final_url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Http {
                code: status.as_u16(),
            });
        }

        let mut body = response
            .text()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;

        if body.trim().is_empty() {
            return Err(FetchFailure::Parse("empty response body".to_string()));
        }

        if body.len() > MAX_RESPONSE_BODY_SIZE {
            let mut cut = MAX_RESPONSE_BODY_SIZE;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            debug!("Truncating {} byte body from {final_url}", body.len());
            body.truncate(cut);
        }

        Ok((final_url, body))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let strategy = get_retry_strategy(self.retry_delay, self.max_retries);

        let result = RetryIf::start(
            strategy,
            || self.attempt(url),
            |failure: &FetchFailure| {
                let retry = failure.is_transient();
                if retry {
                    debug!("Retrying {url} after transient failure: {failure}");
                }
                retry
            },
        )
        .await;

        match result {
            Ok((final_url, body)) => FetchOutcome::ok(final_url, body),
            Err(failure) => {
                debug!("Fetch of {url} failed: {failure}");
                FetchOutcome::failed(url, FetchStatus::from(failure))
            }
        }
    }
}
