//! Error types used by the crate.

use jotimap_types::error::JotimapTypesError;
use thiserror::Error;

/// Jotimap error type.
#[derive(Debug, Error)]
pub enum JotimapError {
    /// I/O error (network or file).
    #[error("failed to load data")]
    IO,
    /// The server answered with a non-success status code.
    #[error("server responded with status {0}")]
    Http(u16),
    /// Error decoding data.
    #[error("failed to decode data: {0}")]
    Decoding(String),
    /// Invalid JSON document.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid coordinate value.
    #[error(transparent)]
    Coordinate(#[from] JotimapTypesError),
    /// The map session was torn down while the operation was in flight.
    #[error("map session is disposed")]
    Disposed,
}

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
impl From<reqwest::Error> for JotimapError {
    fn from(_value: reqwest::Error) -> Self {
        Self::IO
    }
}
