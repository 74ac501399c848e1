pub mod geometry;
pub mod loader;

pub use geometry::{normalize_coords, Coord, StopGeometry};
pub use loader::{find_stop_files, load_features, InputFeature};

use crate::sdk::error::PrecomputeError;
use serde_json::{Map, Value};
use std::path::Path;

/// A stop to compute an isochrone for.
#[derive(Debug, Clone, PartialEq)]
pub struct StopDescriptor {
    pub lon: f64,
    pub lat: f64,
    /// Position among all loaded features, counted before unusable ones are dropped.
    pub source_index: usize,
    pub properties: Map<String, Value>,
}

impl StopDescriptor {
    pub fn coord(&self) -> Coord {
        (self.lon, self.lat)
    }
}

pub fn extract_stops(features: Vec<InputFeature>) -> Vec<StopDescriptor> {
    features
        .into_iter()
        .enumerate()
        .filter_map(|(source_index, feature)| {
            let Some((lon, lat)) = normalize_coords(feature.geometry.as_ref()) else {
                log::debug!("Feature {} has no usable point geometry, skipping", source_index);
                return None;
            };
            Some(StopDescriptor {
                lon,
                lat,
                source_index,
                properties: feature.properties.unwrap_or_default(),
            })
        })
        .collect()
}

/// Loads every stop under `dir`. Having no stop files at all is an error.
pub fn load_stops(dir: &Path) -> Result<Vec<StopDescriptor>, PrecomputeError> {
    let files = find_stop_files(dir)?;
    if files.is_empty() {
        return Err(PrecomputeError::NoInputFiles {
            dir: dir.to_path_buf(),
        });
    }
    let features = load_features(&files)?;
    Ok(extract_stops(features))
}
