//! Defines the `WeatherCondition` enum, mapping the WMO weather interpretation codes reported in
//! the provider's `weathercode` field to descriptive variants.

/// Represents the WMO weather interpretation code reported by the forecast API.
///
/// Open-Meteo reports the code as a plain integer in `current_weather.weathercode`.
/// See the [Open-Meteo documentation](https://open-meteo.com/en/docs#weathervariables)
/// for the official code table.
///
/// Convert a raw code with [`WeatherCondition::from_code`], or use
/// [`WeatherReading::condition`](crate::WeatherReading::condition) on a fetched reading.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WeatherCondition {
    /// Code 0: Clear sky.
    ClearSky,
    /// Code 1: Mainly clear.
    MainlyClear,
    /// Code 2: Partly cloudy.
    PartlyCloudy,
    /// Code 3: Overcast.
    Overcast,
    /// Code 45: Fog.
    Fog,
    /// Code 48: Depositing rime fog.
    RimeFog,
    /// Code 51: Light drizzle.
    LightDrizzle,
    /// Code 53: Moderate drizzle.
    Drizzle,
    /// Code 55: Dense drizzle.
    DenseDrizzle,
    /// Codes 56, 57: Freezing drizzle (light or dense).
    FreezingDrizzle,
    /// Code 61: Slight rain.
    LightRain,
    /// Code 63: Moderate rain.
    Rain,
    /// Code 65: Heavy rain.
    HeavyRain,
    /// Codes 66, 67: Freezing rain (light or heavy).
    FreezingRain,
    /// Code 71: Slight snowfall.
    LightSnowfall,
    /// Code 73: Moderate snowfall.
    Snowfall,
    /// Code 75: Heavy snowfall.
    HeavySnowfall,
    /// Code 77: Snow grains.
    SnowGrains,
    /// Codes 80, 81: Slight or moderate rain showers.
    RainShower,
    /// Code 82: Violent rain showers.
    HeavyRainShower,
    /// Codes 85, 86: Snow showers (slight or heavy).
    SnowShower,
    /// Code 95: Thunderstorm.
    Thunderstorm,
    /// Codes 96, 99: Thunderstorm with hail.
    ThunderstormWithHail,
}

impl WeatherCondition {
    /// Attempts to convert a WMO weather code into a `WeatherCondition` variant.
    ///
    /// # Returns
    ///
    /// * `Some(WeatherCondition)` if `code` is one of the codes the provider documents.
    /// * `None` for any other value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weather_exporter::WeatherCondition;
    ///
    /// assert_eq!(WeatherCondition::from_code(0), Some(WeatherCondition::ClearSky));
    /// assert_eq!(WeatherCondition::from_code(63), Some(WeatherCondition::Rain));
    /// assert_eq!(WeatherCondition::from_code(4), None);
    /// ```
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(WeatherCondition::ClearSky),
            1 => Some(WeatherCondition::MainlyClear),
            2 => Some(WeatherCondition::PartlyCloudy),
            3 => Some(WeatherCondition::Overcast),
            45 => Some(WeatherCondition::Fog),
            48 => Some(WeatherCondition::RimeFog),
            51 => Some(WeatherCondition::LightDrizzle),
            53 => Some(WeatherCondition::Drizzle),
            55 => Some(WeatherCondition::DenseDrizzle),
            56 | 57 => Some(WeatherCondition::FreezingDrizzle),
            61 => Some(WeatherCondition::LightRain),
            63 => Some(WeatherCondition::Rain),
            65 => Some(WeatherCondition::HeavyRain),
            66 | 67 => Some(WeatherCondition::FreezingRain),
            71 => Some(WeatherCondition::LightSnowfall),
            73 => Some(WeatherCondition::Snowfall),
            75 => Some(WeatherCondition::HeavySnowfall),
            77 => Some(WeatherCondition::SnowGrains),
            80 | 81 => Some(WeatherCondition::RainShower),
            82 => Some(WeatherCondition::HeavyRainShower),
            85 | 86 => Some(WeatherCondition::SnowShower),
            95 => Some(WeatherCondition::Thunderstorm),
            96 | 99 => Some(WeatherCondition::ThunderstormWithHail),
            _ => None,
        }
    }

    /// Whether the condition involves any falling precipitation.
    pub fn is_precipitation(self) -> bool {
        !matches!(
            self,
            WeatherCondition::ClearSky
                | WeatherCondition::MainlyClear
                | WeatherCondition::PartlyCloudy
                | WeatherCondition::Overcast
                | WeatherCondition::Fog
                | WeatherCondition::RimeFog
        )
    }
}
