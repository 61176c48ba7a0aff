use crate::config::ConfigError;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialise HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to set up metrics registry")]
    Metrics(#[from] prometheus::Error),

    #[error("Invalid listen address '{0}'")]
    ListenAddr(String, #[source] std::net::AddrParseError),

    #[error("Metrics server on {0} failed")]
    Server(SocketAddr, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
