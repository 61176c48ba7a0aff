use crate::types::location::Location;

/// Destination for the gauges the polling workflow publishes.
///
/// Each setter overwrites the previous value for its key (last write wins) and must be safe to
/// call from several tasks at once; every (metric, location) cell is written independently.
/// Sinks keep no history.
pub trait MetricsSink: Send + Sync {
    /// Sets the temperature gauge, in degrees Celsius, for `location`.
    fn set_temperature(&self, location: &Location, celsius: f64);

    /// Sets the wind speed gauge, in km/h, for `location`.
    fn set_windspeed(&self, location: &Location, kmh: f64);

    /// Sets the overall forecast API health indicator.
    fn set_api_up(&self, up: bool);
}
