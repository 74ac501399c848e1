use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the isochrone service, e.g. `{"message": "Not Authorized - Invalid Token"}`.
#[derive(Deserialize, Debug)]
pub struct ApiErrorPayload {
    pub message: String,
}

/// Why a single isochrone could not be obtained. The stop is skipped; the run goes on.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("API Error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // Fallback when the error body is not the expected JSON shape
    #[error("Unstructured API Error (HTTP {status}): {body}")]
    RawApi { status: u16, body: String },

    #[error("Failed to parse isochrone response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn from_status(status: u16, body: String) -> Self {
        match serde_json::from_str::<ApiErrorPayload>(&body) {
            Ok(payload) => FetchError::Api {
                status,
                message: payload.message,
            },
            Err(_) => FetchError::RawApi { status, body },
        }
    }
}
