pub mod aggregate;
pub mod config;
pub mod error;
pub mod isochrone;
pub mod pipeline;
pub mod stops;
pub mod util;
