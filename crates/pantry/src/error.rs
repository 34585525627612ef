//! Error types for pantry.
//!
//! These never cross the public query surface: query functions log them and
//! degrade to an empty result.

use pantry_fetch::FetchError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A final non-2xx status below 500. Mostly 4xx; redirects the
    /// transport did not follow (3xx) land here too and are not retried.
    #[error("upstream answered HTTP {status}")]
    Client { status: u16 },

    #[error("malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
