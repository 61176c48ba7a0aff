//! Provides [`WeatherClient`], which performs one current-weather request for one location.

use crate::types::location::Location;
use crate::types::weather_reading::WeatherReading;
use crate::weather_client::error::FetchError;
use bon::bon;
use log::debug;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default forecast endpoint. Latitude and longitude are appended as query parameters.
pub const DEFAULT_API_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Result of a single fetch: a whole reading, or the reason there is none.
pub type FetchOutcome = Result<WeatherReading, FetchError>;

/// Client for the forecast API's `current_weather` endpoint.
///
/// The client is cheap to share by reference: it holds one pooled `reqwest::Client` that every
/// fetch reuses. It never retries and never caches; each call to [`WeatherClient::fetch`] is
/// exactly one HTTP request.
///
/// # Examples
///
/// ```no_run
/// # use weather_exporter::{Location, WeatherClient};
/// # use std::time::Duration;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WeatherClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let berlin = Location::new("berlin", "Berlin", 52.52, 13.41);
/// let reading = client.fetch(&berlin).await?;
/// println!("{} °C in {}", reading.temperature, berlin.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    http: Client,
}

#[bon]
impl WeatherClient {
    /// Creates a new `WeatherClient`.
    ///
    /// # Builder Methods
    ///
    /// * `.base_url(impl Into<String>)`: Optional. Forecast endpoint, defaults to
    ///   [`DEFAULT_API_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Deadline applied to every request made by this client.
    ///   Without it a request may wait as long as the remote end keeps the connection open.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the underlying HTTP client cannot be initialised
    /// (e.g. the TLS backend fails to load).
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_API_BASE_URL.to_string())] base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches and decodes the current weather for `location`.
    ///
    /// The response is only parsed when the status is `200 OK`. Whatever happens, the response
    /// and its connection are released before this returns.
    ///
    /// # Errors
    ///
    /// * [`FetchError::Transport`] if the request cannot be sent or the body cannot be read.
    /// * [`FetchError::HttpStatus`] if the provider answers with anything but `200 OK`.
    /// * [`FetchError::Decode`] if the body is not the expected JSON document.
    pub async fn fetch(&self, location: &Location) -> FetchOutcome {
        let request = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .build()
            .map_err(|e| FetchError::Transport {
                url: self.base_url.clone(),
                source: e,
            })?;
        let url = request.url().to_string();
        debug!("Fetching current weather for {} from {}", location.name, url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus { url, status });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            source: e,
        })?;
        WeatherReading::from_json(&body).map_err(|e| FetchError::Decode { url, source: e })
    }
}
