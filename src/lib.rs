//! Polls current weather for a set of locations from the Open-Meteo forecast API and republishes
//! it as Prometheus gauges.
//!
//! The pieces fit together like this:
//!
//! * a [`LocationSource`] ([`StaticLocations`] or [`CatalogFile`]) says what to poll,
//! * a [`WeatherClient`] fetches one location at a time,
//! * a [`MetricsSink`] ([`PrometheusSink`]) holds the latest values for scraping,
//! * the [`PollingWorkflow`] ties them together on a fixed interval.

mod config;
mod error;
mod locations;
mod metrics;
mod types;
mod weather_client;
mod workflow;

pub use config::*;
pub use error::ExporterError;
pub use workflow::*;

pub use locations::catalog::CatalogFile;
pub use locations::error::LocationSourceError;
pub use locations::source::LocationSource;
pub use locations::static_source::StaticLocations;

pub use metrics::prometheus_sink::PrometheusSink;
pub use metrics::sink::MetricsSink;

pub use types::location::Location;
pub use types::weather_condition::WeatherCondition;
pub use types::weather_reading::WeatherReading;

pub use weather_client::client::*;
pub use weather_client::error::FetchError;
