//! Error types for pantry-fetch.

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timeout after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("server error: HTTP {status}")]
    Server { status: u16 },
}

impl FetchError {
    /// Whether another attempt may succeed where this one failed.
    ///
    /// Every transport-level failure and every 5xx is transient; client
    /// errors never reach this type because they are returned as responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout(_) | FetchError::Network(_) | FetchError::Server { .. } => true,
        }
    }
}
