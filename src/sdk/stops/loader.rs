use crate::sdk::error::PrecomputeError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const STOP_FILE_EXTENSION: &str = "geojson";

/// One feature as read from a stop file. Geometry stays untyped until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputFeature {
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct StopFile {
    #[serde(default)]
    features: Vec<InputFeature>,
}

/// Lists `*.geojson` files (case-insensitive) directly under `dir`, sorted by path.
pub fn find_stop_files(dir: &Path) -> Result<Vec<PathBuf>, PrecomputeError> {
    let entries = fs::read_dir(dir).map_err(|e| PrecomputeError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PrecomputeError::io(dir, e))?.path();
        let is_stop_file = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(STOP_FILE_EXTENSION));
        if is_stop_file && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Concatenates the features of every file, in file order then feature order.
pub fn load_features(files: &[PathBuf]) -> Result<Vec<InputFeature>, PrecomputeError> {
    let mut features = Vec::new();
    for path in files {
        let file = File::open(path).map_err(|e| PrecomputeError::io(path, e))?;
        let parsed: StopFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PrecomputeError::json(path, e))?;
        log::debug!("Loaded {} features from {}", parsed.features.len(), path.display());
        features.extend(parsed.features);
    }
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_only_geojson_files_in_sorted_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.geojson"), "{}").unwrap();
        fs::write(dir.path().join("a.GeoJSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.geojson")).unwrap();

        let files = find_stop_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.GeoJSON", "b.geojson"]);
    }

    #[test]
    fn loads_features_across_files_in_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("1.geojson");
        let second = dir.path().join("2.geojson");
        fs::write(
            &first,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,"properties":{"n":1}},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":null}
            ]}"#,
        )
        .unwrap();
        fs::write(&second, r#"{"type":"Feature","properties":{}}"#).unwrap();

        let features = load_features(&[first, second]).unwrap();
        assert_eq!(features.len(), 2);
        assert!(features[0].geometry.is_none());
        assert!(features[1].properties.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.geojson");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            load_features(&[bad]),
            Err(PrecomputeError::Json { .. })
        ));
    }
}
