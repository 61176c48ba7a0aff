use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce the location set for a cycle.
///
/// The polling workflow treats this as "no locations this cycle": it skips fetching and
/// publishing, then tries again after the normal interval.
#[derive(Debug, Error)]
pub enum LocationSourceError {
    #[error("Failed to read location catalog '{0}'")]
    CatalogRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse location catalog '{0}'")]
    CatalogParse(PathBuf, #[source] serde_json::Error),

    #[error("Invalid coordinates for location '{id}': {message}")]
    InvalidCoordinates { id: String, message: String },
}
