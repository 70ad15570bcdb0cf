//! OpenWeatherMap 2.5 response shapes and their conversion into domain types.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{Coordinates, CurrentWeather, FetchError, ForecastEntry, IconCode};

/// The API reports status as `200` on `/weather` success but `"404"` on
/// failure, and `"200"` on `/forecast`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusCode {
    Number(u16),
    Text(String),
}

impl StatusCode {
    fn as_u16(&self) -> Option<u16> {
        match self {
            StatusCode::Number(n) => Some(*n),
            StatusCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    cod: Option<StatusCode>,
    /// String on failure, number (usually 0) on forecast success
    #[serde(default)]
    message: Value,
}

/// Check the body's `cod` field; anything other than 200 is an API failure
/// carrying the API's own message.
pub(crate) fn check_status(body: &Value) -> Result<(), FetchError> {
    let envelope = Envelope::deserialize(body)?;
    let code = envelope.cod.as_ref().and_then(StatusCode::as_u16);
    if code == Some(200) {
        return Ok(());
    }
    let message = match envelope.message {
        Value::String(s) => s,
        _ => String::new(),
    };
    Err(FetchError::Api {
        code: code.unwrap_or(0),
        message,
    })
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

fn first_condition(conditions: Vec<Condition>) -> Result<Condition, FetchError> {
    conditions
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("response has no weather condition".to_string()))
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Clouds {
    all: u8,
}

#[derive(Debug, Deserialize, Default)]
struct Sys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    coord: Coordinates,
    weather: Vec<Condition>,
    main: CurrentMain,
    #[serde(default)]
    visibility: u32,
    wind: Wind,
    clouds: Clouds,
    #[serde(default)]
    sys: Sys,
    name: String,
}

impl CurrentResponse {
    pub(crate) fn into_current(self) -> Result<CurrentWeather, FetchError> {
        let condition = first_condition(self.weather)?;
        Ok(CurrentWeather {
            name: self.name,
            country: self.sys.country,
            coordinates: self.coord,
            description: condition.description,
            icon: IconCode(condition.icon),
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            pressure: self.main.pressure,
            visibility: self.visibility,
            cloudiness: self.clouds.all,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SampleMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Sample {
    dt: i64,
    main: SampleMain,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    list: Vec<Sample>,
}

impl ForecastResponse {
    pub(crate) fn into_entries(self) -> Result<Vec<ForecastEntry>, FetchError> {
        self.list
            .into_iter()
            .map(|sample| {
                let timestamp = DateTime::from_timestamp(sample.dt, 0).ok_or_else(|| {
                    FetchError::Parse(format!("forecast timestamp out of range: {}", sample.dt))
                })?;
                let condition = first_condition(sample.weather)?;
                Ok(ForecastEntry {
                    timestamp,
                    temperature: sample.main.temp,
                    icon: IconCode(condition.icon),
                    description: condition.description,
                })
            })
            .collect()
    }
}
