use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a run outright. Per-stop problems are logged and skipped instead.
#[derive(Error, Debug)]
pub enum PrecomputeError {
    #[error("No access token: pass --token or set MAPBOX_ACCESS_TOKEN")]
    MissingToken,

    #[error("No stop GeoJSON files found in {}", dir.display())]
    NoInputFiles { dir: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl PrecomputeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrecomputeError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        PrecomputeError::Json {
            path: path.into(),
            source,
        }
    }
}
