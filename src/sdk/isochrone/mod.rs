pub mod backoff;
pub mod cache;
pub mod error;
pub mod key;
pub mod provider;
pub mod service;

pub use backoff::{AttemptClass, Backoff, RetryPolicy};
pub use cache::{FsResponseCache, ResponseStore};
pub use error::FetchError;
pub use key::CacheKey;
pub use provider::{HttpTransport, RawResponse, RemoteIsochroneProvider, Transport};
pub use service::IsochroneProvider;
