//! Plain data passed between the layers: options and raw responses.

pub mod options;
pub mod response;

pub use options::FetchOptions;
pub use response::RawResponse;
