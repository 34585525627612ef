use std::sync::Arc;
use std::time::Duration;

/// Configuration for a single logical fetch (all of its attempts).
///
/// # Examples
///
/// ```
/// use pantry_fetch::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .max_attempts(5)
///     .retry_backoff(Duration::from_millis(200))
///     .header("User-Agent", "pantry/0.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// How long one attempt may wait for a response before it is abandoned.
    ///
    /// Default: 10s
    pub timeout: Duration,

    /// Total attempts, including the first one.
    ///
    /// - Retries happen for timeouts, network errors and 5xx responses
    /// - A 4xx response is returned on the first attempt that sees it
    /// - Zero is treated as one
    ///
    /// Default: 3
    pub max_attempts: u32,

    /// Base delay for exponential backoff between attempts.
    ///
    /// The wait after failed attempt `i` (0-indexed) is `retry_backoff * 2^i`.
    ///
    /// Default: 1s
    pub retry_backoff: Duration,

    /// Headers sent with every attempt.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            retry_backoff: Duration::from_secs(1),
            headers: Arc::new([]),
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Add a single custom HTTP header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    /// Replace all custom headers at once.
    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Arc::from(headers);
        self
    }
}
