//! The decoded current-weather reading and the wire model of the forecast API payload.

use crate::types::weather_condition::WeatherCondition;
use serde::Deserialize;

/// Current weather at one location, as reported by the forecast API.
///
/// A reading is produced fresh by every successful fetch and carries no identity of its own;
/// it only means something together with the [`Location`](crate::Location) it was fetched for.
/// Fields missing from the payload are zero (`0.0`, `false`, `0`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeatherReading {
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Wind speed in km/h.
    pub windspeed: f64,
    /// Wind direction in degrees (0-360).
    pub winddirection: f64,
    /// Whether it is currently daytime at the location.
    pub is_day: bool,
    /// WMO weather interpretation code. See [`WeatherCondition`].
    pub weathercode: i64,
}

impl WeatherReading {
    /// Decodes a forecast API response body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `body` is not a JSON document of the expected shape.
    /// Nothing of a partially parsed body is kept.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<ForecastResponse>(body).map(ForecastResponse::into_reading)
    }

    /// The weather code mapped to a [`WeatherCondition`], if it is a known code.
    pub fn condition(&self) -> Option<WeatherCondition> {
        WeatherCondition::from_code(self.weathercode)
    }
}

// --- Wire model ---

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
}

// `null` and absent are both read as the zero value.
#[derive(Debug, Deserialize, Default)]
struct CurrentWeather {
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    windspeed: Option<f64>,
    #[serde(default)]
    winddirection: Option<f64>,
    #[serde(default)]
    is_day: Option<i64>,
    #[serde(default)]
    weathercode: Option<i64>,
}

impl ForecastResponse {
    fn into_reading(self) -> WeatherReading {
        let current = self.current_weather.unwrap_or_default();
        WeatherReading {
            temperature: current.temperature.unwrap_or_default(),
            windspeed: current.windspeed.unwrap_or_default(),
            winddirection: current.winddirection.unwrap_or_default(),
            is_day: current.is_day.unwrap_or_default() != 0,
            weathercode: current.weathercode.unwrap_or_default(),
        }
    }
}
