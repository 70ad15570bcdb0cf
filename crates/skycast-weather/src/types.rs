use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from OpenWeatherMap icon codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    FewClouds,
    Cloudy,
    Drizzle,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
}

impl WeatherCondition {
    /// Convert an icon code such as `"10d"` to a WeatherCondition.
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_icon_code(code: &str) -> Self {
        match code.get(..2) {
            Some("01") => Self::Clear,
            Some("02") => Self::FewClouds,
            Some("03") | Some("04") => Self::Cloudy,
            Some("09") => Self::Drizzle,
            Some("10") => Self::Rain,
            Some("11") => Self::Thunderstorm,
            Some("13") => Self::Snow,
            Some("50") => Self::Mist,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    /// Terminal glyph standing in for the icon image
    pub fn glyph(&self, is_night: bool) -> &'static str {
        match self {
            Self::Clear if is_night => "🌙",
            Self::Clear => "☀",
            Self::FewClouds => "⛅",
            Self::Cloudy => "☁",
            Self::Drizzle => "🌧",
            Self::Rain => "🌦",
            Self::Thunderstorm => "⛈",
            Self::Snow => "❄",
            Self::Mist => "🌫",
        }
    }
}

/// Icon code as returned by the API (`"04n"`), with helpers for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconCode(pub String);

impl IconCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_icon_code(&self.0)
    }

    pub fn is_night(&self) -> bool {
        self.0.ends_with('n')
    }

    pub fn glyph(&self) -> &'static str {
        self.condition().glyph(self.is_night())
    }

    /// Asset URL, e.g. `https://openweathermap.org/img/wn/10d@2x.png`
    pub fn url(&self, base_url: &str, scale: u8) -> String {
        format!("{}/{}@{}x.png", base_url.trim_end_matches('/'), self.0, scale)
    }
}

/// Geographic coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for a city, in metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub description: String,
    pub icon: IconCode,
    pub temperature: f64,
    pub feels_like: f64,
    /// Percent
    pub humidity: u8,
    /// Metres per second
    pub wind_speed: f64,
    /// Hectopascal
    pub pressure: u32,
    /// Metres
    pub visibility: u32,
    /// Percent
    pub cloudiness: u8,
}

impl CurrentWeather {
    pub fn visibility_km(&self) -> f64 {
        f64::from(self.visibility) / 1000.0
    }
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub icon: IconCode,
    pub description: String,
}

/// Successful outcome of one fetch cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    /// Chronological, 3-hour spacing as returned by the API
    pub forecast: Vec<ForecastEntry>,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("No city given")]
    EmptyCity,
    #[error("Weather API error {code}: {message}")]
    Api { code: u16, message: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}
