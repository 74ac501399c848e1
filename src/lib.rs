pub mod sdk;

pub use sdk::aggregate::{select_feature, IsochroneCollection};
pub use sdk::config::{AccessToken, PrecomputeConfig, Profile};
pub use sdk::error::PrecomputeError;
pub use sdk::isochrone::{CacheKey, FsResponseCache, IsochroneProvider, ResponseStore};
pub use sdk::pipeline::{run, RunSummary};
pub use sdk::stops::{load_stops, StopDescriptor};
