//! A location source backed by a JSON catalog file on disk.
//!
//! The file holds an array of locations:
//!
//! ```json
//! [
//!   {"id": "ber", "name": "Berlin", "latitude": 52.52, "longitude": 13.41},
//!   {"id": "par", "name": "Paris", "latitude": 48.85, "longitude": 2.35}
//! ]
//! ```
//!
//! The catalog is read again on every call, so edits are picked up by the next cycle without a
//! restart.

use crate::locations::error::LocationSourceError;
use crate::locations::source::LocationSource;
use crate::locations::static_source::validate_all;
use crate::types::location::Location;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LocationSource for CatalogFile {
    async fn all_locations(&self) -> Result<Vec<Location>, LocationSourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| LocationSourceError::CatalogRead(self.path.clone(), e))?;
        let locations = serde_json::from_slice::<Vec<Location>>(&bytes)
            .map_err(|e| LocationSourceError::CatalogParse(self.path.clone(), e))?;
        validate_all(&locations)?;
        debug!(
            "Loaded {} locations from catalog {}",
            locations.len(),
            self.path.display()
        );
        Ok(locations)
    }
}
