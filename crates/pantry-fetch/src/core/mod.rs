//! Pure decisions behind retrying and caching.
//!
//! Nothing here performs I/O or reads the clock; callers pass in time.

mod freshness;
mod retry;

pub use freshness::is_fresh;
pub use retry::{is_retryable_status, retry_delay};
