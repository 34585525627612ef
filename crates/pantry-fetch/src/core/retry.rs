use std::time::Duration;

/// Delay to wait after failed attempt `attempt` (0-indexed) before the next one.
///
/// Pure exponential backoff without jitter: `base * 2^attempt`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pantry_fetch::retry_delay;
///
/// let base = Duration::from_secs(1);
/// assert_eq!(retry_delay(0, base), Duration::from_secs(1));
/// assert_eq!(retry_delay(1, base), Duration::from_secs(2));
/// assert_eq!(retry_delay(2, base), Duration::from_secs(4));
/// ```
pub fn retry_delay(attempt: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(attempt);
    base.saturating_mul(multiplier)
}

/// A status is worth retrying only when the server says it failed (5xx).
///
/// Anything below 500, including 4xx, is a final answer.
pub fn is_retryable_status(status: u16) -> bool {
    status >= 500
}
