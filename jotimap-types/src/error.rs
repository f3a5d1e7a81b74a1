//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum JotimapTypesError {
    /// Coordinate conversion error.
    #[error("invalid input coordinate: {0}")]
    Conversion(String),
}
