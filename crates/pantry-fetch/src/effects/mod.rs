//! I/O side of the crate: the HTTP seam, the retrying fetcher, the clock
//! and the response cache.

mod cache;
mod clock;
mod fetcher;
mod http;

pub use cache::{DEFAULT_TTL, ResponseCache};
pub use clock::{Clock, SystemClock};
pub use fetcher::Fetcher;
pub use http::HttpClient;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
