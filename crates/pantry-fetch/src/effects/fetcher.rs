use std::time::Duration;

use tracing::{debug, warn};

use crate::core::{is_retryable_status, retry_delay};
use crate::data::{FetchOptions, RawResponse};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Transport and retry layers over an [`HttpClient`].
///
/// Every call to [`Fetcher::fetch_with_retry`] owns its own attempt budget;
/// nothing is shared between logical calls.
#[derive(Debug, Clone)]
pub struct Fetcher<C: HttpClient> {
    client: C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C, options: FetchOptions) -> Self {
        Self { client, options }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Issue exactly one request, abandoning it after `timeout`.
    ///
    /// Returns the response whatever its status.
    pub async fn fetch_once(&self, url: &str, timeout: Duration) -> Result<RawResponse> {
        match tokio::time::timeout(timeout, self.client.get(url, &self.options.headers)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(FetchError::Network(e.to_string())),
            Err(_) => Err(FetchError::Timeout(timeout)),
        }
    }

    /// Up to `max_attempts` calls to [`Fetcher::fetch_once`] with exponential backoff.
    ///
    /// Timeouts, network errors and 5xx responses are retried. A response
    /// below 500 is returned as soon as it is seen. When the budget runs out
    /// the last failure is returned.
    pub async fn fetch_with_retry(&self, url: &str, max_attempts: u32) -> Result<RawResponse> {
        let max_attempts = max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let failure = match self.fetch_once(url, self.options.timeout).await {
                Ok(response) if !is_retryable_status(response.status) => return Ok(response),
                Ok(response) => FetchError::Server {
                    status: response.status,
                },
                Err(e) => e,
            };

            attempt += 1;
            if attempt >= max_attempts {
                warn!(url, attempts = attempt, error = %failure, "giving up");
                return Err(failure);
            }

            let delay = retry_delay(attempt - 1, self.options.retry_backoff);
            warn!(url, attempt, error = %failure, ?delay, "retrying");
            tokio::time::sleep(delay).await;
        }
    }

    /// [`Fetcher::fetch_with_retry`] with the configured attempt budget.
    pub async fn fetch(&self, url: &str) -> Result<RawResponse> {
        debug!(url, "fetching");
        self.fetch_with_retry(url, self.options.max_attempts).await
    }
}
