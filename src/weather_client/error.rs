use thiserror::Error;

/// Why a single fetch for one location did not produce a [`WeatherReading`](crate::WeatherReading).
///
/// All variants are per-location and non-fatal: the polling workflow logs them and leaves the
/// location's previously exported values in place.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode weather payload from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Short, stable name of the failure kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::Decode { .. } => "decode",
        }
    }
}
