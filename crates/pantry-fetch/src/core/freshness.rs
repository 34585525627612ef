use std::time::{Duration, Instant};

/// An entry fetched at `fetched_at` is fresh iff `now - fetched_at < ttl`.
///
/// A clock that reads earlier than `fetched_at` counts as zero elapsed time.
pub fn is_fresh(fetched_at: Instant, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(fetched_at) < ttl
}
