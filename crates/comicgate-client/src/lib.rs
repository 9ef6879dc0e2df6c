//! Comicgate Client
//!
//! Data-access facade over the gateway's `/api/upstream/{kind}` endpoint with
//! an optional time-bounded response cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod key;

pub use cache::{CacheEntry, ResponseCache};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use facade::ComicsClient;
pub use key::CacheKey;
