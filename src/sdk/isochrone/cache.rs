use super::key::CacheKey;
use crate::sdk::error::PrecomputeError;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key-value storage for raw isochrone responses.
pub trait ResponseStore {
    /// A stored response, or `None` when there is nothing usable for `key`.
    fn get(&self, key: &CacheKey) -> Option<Value>;

    fn put(&self, key: &CacheKey, response: &Value) -> Result<(), PrecomputeError>;
}

/// One JSON file per key inside a cache directory.
#[derive(Debug, Clone)]
pub struct FsResponseCache {
    dir: PathBuf,
}

impl FsResponseCache {
    /// Opens the cache, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, PrecomputeError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| PrecomputeError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl ResponseStore for FsResponseCache {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        let path = self.path_for(key);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Unreadable cache entry {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice::<Value>(&data) {
            Ok(value) if is_empty_payload(&value) => {
                log::debug!("Empty cache entry {}, refetching", path.display());
                None
            }
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    fn put(&self, key: &CacheKey, response: &Value) -> Result<(), PrecomputeError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_vec(response).map_err(|e| PrecomputeError::json(&path, e))?;
        // Write then rename, so an interrupted run never leaves a truncated entry.
        fs::write(&tmp, data).map_err(|e| PrecomputeError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| PrecomputeError::io(&path, e))
    }
}

/// Only a non-empty object or array can hold an isochrone. Scalars, `{}` and `[]` never count as a hit.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => true,
    }
}
