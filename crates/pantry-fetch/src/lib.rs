//! Resilient fetching for read-only JSON APIs.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Options and raw responses
//! - `core` - Pure retry and freshness decisions
//! - `effects` - Transport, retry loop, clock and cache
//!
//! Requests flow `ResponseCache` -> `Fetcher::fetch_with_retry` ->
//! `Fetcher::fetch_once` -> [`HttpClient`]. The cache is generic over what
//! it stores and over its [`Clock`], so callers decide what a cached payload
//! is and tests decide what time it is.

mod core;
mod data;
mod effects;
mod error;

pub use crate::core::{is_fresh, is_retryable_status, retry_delay};
pub use crate::data::{FetchOptions, RawResponse};
pub use crate::effects::{Clock, DEFAULT_TTL, Fetcher, HttpClient, ResponseCache, SystemClock};

#[cfg(feature = "reqwest")]
pub use crate::effects::ReqwestClient;

pub use crate::error::{FetchError, Result};
