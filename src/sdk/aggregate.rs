use super::error::PrecomputeError;
use super::stops::StopDescriptor;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const ORIGIN_LON: &str = "_origin_lon";
pub const ORIGIN_LAT: &str = "_origin_lat";
pub const SOURCE_INDEX: &str = "_source_index";
pub const STOP_PROPERTIES: &str = "_stop_properties";

/// Picks the one polygon feature kept for a stop.
///
/// A collection contributes its first feature, a bare `Feature` is used as is.
/// Anything else, including an empty collection, yields nothing.
pub fn select_feature(response: Value) -> Option<Map<String, Value>> {
    let Value::Object(mut response) = response else {
        return None;
    };

    if let Some(Value::Array(features)) = response.get_mut("features") {
        if !features.is_empty() {
            return match features.swap_remove(0) {
                Value::Object(feature) => Some(feature),
                _ => None,
            };
        }
    }

    match response.get("type").and_then(Value::as_str) {
        Some("Feature") => Some(response),
        _ => None,
    }
}

/// The combined output: one annotated isochrone per resolved stop.
#[derive(Debug, Clone, Serialize)]
pub struct IsochroneCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<Value>,
}

impl Default for IsochroneCollection {
    fn default() -> Self {
        Self {
            kind: "FeatureCollection",
            features: Vec::new(),
        }
    }
}

impl IsochroneCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `feature` after stamping it with where it came from.
    pub fn push(&mut self, stop: &StopDescriptor, mut feature: Map<String, Value>) {
        let properties = feature
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        if !properties.is_object() {
            *properties = Value::Object(Map::new());
        }
        if let Value::Object(properties) = properties {
            properties.insert(ORIGIN_LON.into(), Value::from(stop.lon));
            properties.insert(ORIGIN_LAT.into(), Value::from(stop.lat));
            properties.insert(SOURCE_INDEX.into(), Value::from(stop.source_index));
            properties.insert(
                STOP_PROPERTIES.into(),
                Value::Object(stop.properties.clone()),
            );
        }
        self.features.push(Value::Object(feature));
    }

    pub fn features(&self) -> &[Value] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serializes the whole collection to `path` in one go.
    pub fn write_to(&self, path: &Path) -> Result<(), PrecomputeError> {
        let file = File::create(path).map_err(|e| PrecomputeError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| PrecomputeError::json(path, e))?;
        writer.flush().map_err(|e| PrecomputeError::io(path, e))
    }
}
