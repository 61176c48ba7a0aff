//! The polling workflow: on a fixed interval, resolve the location set, fetch every location
//! concurrently, wait for all of them, and publish the successful readings.
//!
//! One cycle is `resolve -> fetch all -> publish -> sleep`. The fetch fan-out is joined before
//! anything is published, so a slow request from one cycle can never overwrite the result of a
//! later one. Nothing that goes wrong inside a cycle stops the loop; only the cancellation
//! token does.

use crate::locations::error::LocationSourceError;
use crate::locations::source::LocationSource;
use crate::metrics::sink::MetricsSink;
use crate::types::location::Location;
use crate::weather_client::client::{FetchOutcome, WeatherClient};
use bon::bon;
use futures_util::future::join_all;
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Time between the end of one cycle and the start of the next, unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How per-location outcomes of one cycle are folded into the `weather_api_up` indicator.
///
/// With a single location both rules are the same: the API is up iff that fetch succeeded.
/// A cycle with no locations reports the API as down under either rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiHealthRule {
    /// Up if at least one location was fetched successfully.
    #[default]
    AnySucceeded,
    /// Up only if every location was fetched successfully.
    AllSucceeded,
}

impl ApiHealthRule {
    pub fn is_up(self, summary: &CycleSummary) -> bool {
        match self {
            ApiHealthRule::AnySucceeded => summary.succeeded > 0,
            ApiHealthRule::AllSucceeded => summary.polled > 0 && summary.failed() == 0,
        }
    }
}

/// Counts for one completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Number of locations fetched; every one produced exactly one outcome.
    pub polled: usize,
    /// Number of fetches that produced a reading.
    pub succeeded: usize,
}

impl CycleSummary {
    pub fn failed(&self) -> usize {
        self.polled - self.succeeded
    }
}

/// Drives the fetch-and-publish cycle.
///
/// Build one with [`PollingWorkflow::builder`], then either call [`PollingWorkflow::poll_once`]
/// to run a single cycle or [`PollingWorkflow::run`] to loop until cancelled.
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use std::time::Duration;
/// # use tokio_util::sync::CancellationToken;
/// # use weather_exporter::{Location, PollingWorkflow, PrometheusSink, StaticLocations, WeatherClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sink = Arc::new(PrometheusSink::new()?);
/// let workflow = PollingWorkflow::builder()
///     .locations(Arc::new(StaticLocations::new(vec![
///         Location::new("berlin", "Berlin", 52.52, 13.41),
///     ])?))
///     .client(WeatherClient::builder().build()?)
///     .sink(sink.clone())
///     .interval(Duration::from_secs(30))
///     .build();
///
/// let shutdown = CancellationToken::new();
/// let task = tokio::spawn({
///     let shutdown = shutdown.clone();
///     async move { workflow.run(shutdown).await }
/// });
///
/// // ... later
/// shutdown.cancel();
/// task.await?;
/// # Ok(())
/// # }
/// ```
pub struct PollingWorkflow {
    locations: Arc<dyn LocationSource>,
    client: WeatherClient,
    sink: Arc<dyn MetricsSink>,
    interval: Duration,
    health_rule: ApiHealthRule,
}

#[bon]
impl PollingWorkflow {
    /// Creates a new `PollingWorkflow`.
    ///
    /// # Builder Methods
    ///
    /// * `.locations(Arc<dyn LocationSource>)`: **Required.** Where each cycle's locations come from.
    /// * `.client(WeatherClient)`: **Required.** Client used for every fetch.
    /// * `.sink(Arc<dyn MetricsSink>)`: **Required.** Where readings and API health are published.
    /// * `.interval(Duration)`: Optional. Pause between cycles, defaults to [`DEFAULT_POLL_INTERVAL`].
    /// * `.health_rule(ApiHealthRule)`: Optional. Defaults to [`ApiHealthRule::AnySucceeded`].
    #[builder]
    pub fn new(
        locations: Arc<dyn LocationSource>,
        client: WeatherClient,
        sink: Arc<dyn MetricsSink>,
        #[builder(default = DEFAULT_POLL_INTERVAL)] interval: Duration,
        #[builder(default)] health_rule: ApiHealthRule,
    ) -> Self {
        Self {
            locations,
            client,
            sink,
            interval,
            health_rule,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single cycle and returns once every fetch of the cycle has finished.
    ///
    /// Successful readings overwrite the location's temperature and wind speed gauges. A failed
    /// fetch writes nothing for its location, so the last good values stay exported. The API
    /// health indicator is updated according to the configured [`ApiHealthRule`].
    ///
    /// # Errors
    ///
    /// Returns the [`LocationSourceError`] if the location set cannot be loaded. In that case no
    /// fetch is made and the sink is not touched at all.
    pub async fn poll_once(&self) -> Result<CycleSummary, LocationSourceError> {
        let locations = self.locations.all_locations().await?;

        let outcomes = join_all(
            locations
                .iter()
                .map(|location| self.client.fetch(location)),
        )
        .await;

        let mut summary = CycleSummary {
            polled: locations.len(),
            succeeded: 0,
        };
        for (location, outcome) in locations.iter().zip(outcomes) {
            if self.publish(location, outcome) {
                summary.succeeded += 1;
            }
        }

        self.sink.set_api_up(self.health_rule.is_up(&summary));
        Ok(summary)
    }

    /// Polls forever, sleeping [`interval`](PollingWorkflow::interval) between cycles, until
    /// `shutdown` is cancelled.
    ///
    /// Cancellation is honoured both while sleeping and in the middle of a cycle; requests still
    /// in flight are dropped and nothing further is written to the sink.
    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            "Weather polling started with interval {:?}",
            self.interval
        );
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                result = self.poll_once() => match result {
                    Ok(summary) => info!(
                        "Weather cycle finished: polled={} succeeded={} failed={}",
                        summary.polled,
                        summary.succeeded,
                        summary.failed()
                    ),
                    Err(e) => error!("Failed to load locations, skipping cycle: {:?}", e),
                },
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        info!("Weather polling stopped");
    }

    /// Writes one outcome to the sink. Returns whether it was a success.
    fn publish(&self, location: &Location, outcome: FetchOutcome) -> bool {
        match outcome {
            Ok(reading) => {
                self.sink.set_temperature(location, reading.temperature);
                self.sink.set_windspeed(location, reading.windspeed);
                debug!(
                    "Weather updated for {}: {:.1}°C, wind {:.1} km/h, condition {:?}",
                    location.name,
                    reading.temperature,
                    reading.windspeed,
                    reading.condition()
                );
                true
            }
            Err(e) => {
                warn!(
                    "Weather fetch failed for {} ({}): {:?}",
                    location.name,
                    e.kind(),
                    e
                );
                false
            }
        }
    }
}
