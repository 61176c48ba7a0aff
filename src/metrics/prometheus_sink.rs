//! A [`MetricsSink`] backed by a private Prometheus registry.
//!
//! Exported metrics:
//!
//! * `weather_temperature_celsius{city=$NAME}` - Current temperature, in degrees Celsius.
//! * `weather_windspeed_kmh{city=$NAME}` - Current wind speed, in km/h.
//! * `weather_api_up` - 1 if the last cycle reached the forecast API, 0 otherwise.

use crate::metrics::sink::MetricsSink;
use crate::types::location::Location;
use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};

const LOCATION_LABEL: &str = "city";

#[derive(Debug, Clone)]
pub struct PrometheusSink {
    registry: Registry,
    temperature: GaugeVec,
    windspeed: GaugeVec,
    api_up: Gauge,
}

impl PrometheusSink {
    /// Creates the gauges and registers them with a fresh registry owned by this sink.
    ///
    /// # Errors
    ///
    /// Returns the `prometheus` error if a gauge cannot be created or registered.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let temperature = GaugeVec::new(
            Opts::new(
                "weather_temperature_celsius",
                "Current temperature in Celsius",
            ),
            &[LOCATION_LABEL],
        )?;
        let windspeed = GaugeVec::new(
            Opts::new("weather_windspeed_kmh", "Current wind speed in km/h"),
            &[LOCATION_LABEL],
        )?;
        let api_up = Gauge::with_opts(Opts::new(
            "weather_api_up",
            "API status (1 = up, 0 = down)",
        ))?;

        registry.register(Box::new(temperature.clone()))?;
        registry.register(Box::new(windspeed.clone()))?;
        registry.register(Box::new(api_up.clone()))?;

        Ok(Self {
            registry,
            temperature,
            windspeed,
            api_up,
        })
    }

    pub fn api_up(&self) -> bool {
        self.api_up.get() != 0.0
    }

    /// Content type of the body produced by [`PrometheusSink::render`].
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Renders the current value of every gauge in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns the `prometheus` error if encoding fails.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsSink for PrometheusSink {
    fn set_temperature(&self, location: &Location, celsius: f64) {
        self.temperature
            .with_label_values(&[location.name.as_str()])
            .set(celsius);
    }

    fn set_windspeed(&self, location: &Location, kmh: f64) {
        self.windspeed
            .with_label_values(&[location.name.as_str()])
            .set(kmh);
    }

    fn set_api_up(&self, up: bool) {
        self.api_up.set(if up { 1.0 } else { 0.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_last_write_wins() -> Result<(), prometheus::Error> {
        let sink = PrometheusSink::new()?;
        let berlin = Location::new("ber", "Berlin", 52.52, 13.41);

        sink.set_temperature(&berlin, 20.0);
        sink.set_temperature(&berlin, 25.5);
        sink.set_windspeed(&berlin, 12.3);

        assert_eq!(sink.temperature.with_label_values(&["Berlin"]).get(), 25.5);
        assert_eq!(sink.windspeed.with_label_values(&["Berlin"]).get(), 12.3);
        Ok(())
    }

    #[test]
    fn test_api_up_toggles() -> Result<(), prometheus::Error> {
        let sink = PrometheusSink::new()?;
        assert!(!sink.api_up());
        sink.set_api_up(true);
        assert!(sink.api_up());
        sink.set_api_up(false);
        assert!(!sink.api_up());
        Ok(())
    }

    #[test]
    fn test_render_exposition() -> Result<(), prometheus::Error> {
        let sink = PrometheusSink::new()?;
        let paris = Location::new("par", "Paris", 48.85, 2.35);
        sink.set_temperature(&paris, -1.5);
        sink.set_windspeed(&paris, 7.0);
        sink.set_api_up(true);

        let text = sink.render()?;
        assert!(text.contains("# TYPE weather_temperature_celsius gauge"), "{text}");
        assert!(text.contains(r#"weather_temperature_celsius{city="Paris"} -1.5"#), "{text}");
        assert!(text.contains(r#"weather_windspeed_kmh{city="Paris"} 7"#), "{text}");
        assert!(text.contains("weather_api_up 1"), "{text}");
        assert!(sink.content_type().starts_with("text/plain"));
        Ok(())
    }

    #[test]
    fn test_sinks_do_not_share_state() -> Result<(), prometheus::Error> {
        let first = PrometheusSink::new()?;
        let second = PrometheusSink::new()?;
        first.set_temperature(&Location::new("ber", "Berlin", 52.52, 13.41), 10.0);

        assert!(!second.render()?.contains("Berlin"));
        Ok(())
    }

    #[test]
    fn test_concurrent_writes_under_distinct_labels() -> Result<(), prometheus::Error> {
        let sink = Arc::new(PrometheusSink::new()?);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    let location = Location::new(format!("id{i}"), format!("City{i}"), 0.0, 0.0);
                    for step in 0..100 {
                        sink.set_temperature(&location, f64::from(i * 1000 + step));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        for i in 0..8 {
            let label = format!("City{i}");
            assert_eq!(
                sink.temperature.with_label_values(&[label.as_str()]).get(),
                f64::from(i * 1000 + 99)
            );
        }
        Ok(())
    }
}
