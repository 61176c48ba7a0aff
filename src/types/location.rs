//! Defines [`Location`], a named point on the globe that the exporter polls
//! current weather for.

use serde::{Deserialize, Serialize};

/// A single polling target.
///
/// Locations are handed out by a [`LocationSource`](crate::LocationSource) at the start of every
/// cycle and are read-only for the rest of that cycle. The display `name` is used as the metric
/// label, so it should be unique across a deployment.
///
/// # Examples
///
/// ```
/// use weather_exporter::Location;
///
/// let berlin = Location::new("berlin", "Berlin", 52.52, 13.41);
/// assert!(berlin.validate().is_ok());
/// assert_eq!(berlin.name, "Berlin");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Opaque unique key for the location (e.g. a catalog row id).
    pub id: String,
    /// Human-readable name, used as the `city` label on exported gauges.
    pub name: String,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Checks that the coordinates are finite and inside the valid degree ranges.
    ///
    /// # Errors
    ///
    /// Returns a message describing the offending coordinate.
    pub fn validate(&self) -> Result<(), String> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "latitude {} of '{}' is outside [-90, 90]",
                self.latitude, self.name
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "longitude {} of '{}' is outside [-180, 180]",
                self.longitude, self.name
            ));
        }
        Ok(())
    }
}
