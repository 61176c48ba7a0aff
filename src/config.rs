//! Exporter configuration, read from a TOML file.
//!
//! ```toml
//! interval_secs = 5
//! api_base_url = "https://api.open-meteo.com/v1/forecast"
//! listen_addr = "0.0.0.0:2112"
//! request_timeout_secs = 10
//! api_health = "any_succeeded"
//!
//! [[locations]]
//! id = "berlin"
//! name = "Berlin"
//! latitude = 52.52
//! longitude = 13.41
//! ```
//!
//! Instead of inline `[[locations]]`, `catalog = "cities.json"` points at a JSON catalog that is
//! re-read every cycle. When both are present the catalog wins.

use crate::locations::catalog::CatalogFile;
use crate::locations::source::LocationSource;
use crate::locations::static_source::StaticLocations;
use crate::types::location::Location;
use crate::weather_client::client::DEFAULT_API_BASE_URL;
use crate::workflow::{ApiHealthRule, DEFAULT_POLL_INTERVAL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:2112";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Per-request deadline in seconds; `0` disables it.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub api_health: ApiHealthRule,
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

fn default_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ExporterConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let mut config: ExporterConfig = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        // A relative catalog path is relative to the config file, not the working directory.
        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfig = toml::from_str(toml_str)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "interval_secs must be greater than 0".to_string(),
            ));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "api_base_url '{}' must be an http(s) URL",
                self.api_base_url
            )));
        }
        if self.catalog.is_none() && self.locations.is_empty() {
            return Err(ConfigError::Invalid(
                "either `catalog` or at least one `[[locations]]` entry is required".to_string(),
            ));
        }
        for location in &self.locations {
            location.validate().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Builds the location source this configuration describes.
    pub fn location_source(&self) -> Result<Arc<dyn LocationSource>, ConfigError> {
        match &self.catalog {
            Some(path) => Ok(Arc::new(CatalogFile::new(path.clone()))),
            None => {
                let locations = StaticLocations::new(self.locations.clone())
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?;
                Ok(Arc::new(locations))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() -> Result<(), ConfigError> {
        let config = ExporterConfig::parse(
            r#"
            [[locations]]
            id = "berlin"
            name = "Berlin"
            latitude = 52.52
            longitude = 13.41
            "#,
        )?;
        assert_eq!(config.interval(), Duration::from_secs(5));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.api_health, ApiHealthRule::AnySucceeded);
        assert_eq!(
            config.locations,
            vec![Location::new("berlin", "Berlin", 52.52, 13.41)]
        );
        Ok(())
    }

    #[test]
    fn test_all_options() -> Result<(), ConfigError> {
        let config = ExporterConfig::parse(
            r#"
            interval_secs = 60
            api_base_url = "http://localhost:8080/v1/forecast"
            listen_addr = "127.0.0.1:9000"
            request_timeout_secs = 0
            api_health = "all_succeeded"
            catalog = "/etc/weather/cities.json"
            "#,
        )?;
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.api_health, ApiHealthRule::AllSucceeded);
        assert_eq!(
            config.catalog.as_deref(),
            Some(Path::new("/etc/weather/cities.json"))
        );
        Ok(())
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = ExporterConfig::parse(
            r#"
            interval_secs = 0
            catalog = "cities.json"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))), "got {result:?}");
    }

    #[test]
    fn test_requires_some_locations() {
        let result = ExporterConfig::parse("interval_secs = 5");
        assert!(matches!(result, Err(ConfigError::Invalid(_))), "got {result:?}");
    }

    #[test]
    fn test_rejects_bad_coordinates_and_urls() {
        let bad_coords = ExporterConfig::parse(
            r#"
            [[locations]]
            id = "x"
            name = "X"
            latitude = -95.0
            longitude = 0.0
            "#,
        );
        assert!(matches!(bad_coords, Err(ConfigError::Invalid(_))));

        let bad_url = ExporterConfig::parse(
            r#"
            api_base_url = "ftp://example.com"
            catalog = "cities.json"
            "#,
        );
        assert!(matches!(bad_url, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result = ExporterConfig::parse(
            r#"
            intervl_secs = 5
            catalog = "cities.json"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(..))), "got {result:?}");
    }

    #[test]
    fn test_from_file_resolves_relative_catalog() -> Result<(), ConfigError> {
        let mut file = NamedTempFile::new().expect("Failed to create temp config");
        writeln!(file, r#"catalog = "cities.json""#).expect("Failed to write temp config");
        file.flush().expect("Failed to flush temp config");

        let config = ExporterConfig::from_file(file.path())?;
        let expected = file
            .path()
            .parent()
            .expect("temp file has a parent")
            .join("cities.json");
        assert_eq!(config.catalog, Some(expected));
        Ok(())
    }

    #[test]
    fn test_from_file_missing() {
        let result = ExporterConfig::from_file("/definitely/not/here/exporter.toml");
        assert!(matches!(result, Err(ConfigError::Read(..))), "got {result:?}");
    }

    #[tokio::test]
    async fn test_location_source_from_inline_locations() -> Result<(), Box<dyn std::error::Error>>
    {
        let config = ExporterConfig::parse(
            r#"
            [[locations]]
            id = "ber"
            name = "Berlin"
            latitude = 52.52
            longitude = 13.41

            [[locations]]
            id = "par"
            name = "Paris"
            latitude = 48.85
            longitude = 2.35
            "#,
        )?;
        let locations = config.location_source()?.all_locations().await?;
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[1].name, "Paris");
        Ok(())
    }
}
