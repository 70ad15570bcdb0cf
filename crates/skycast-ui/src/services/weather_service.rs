//! Weather backend: async weather fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;

use skycast_weather::{FetchError, OpenWeatherClient, WeatherReport};
use tokio_util::sync::CancellationToken;

use crate::models::SearchRequest;

/// Error type for weather operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    EmptyCity,
    /// The API answered with a failure status and its own message
    Rejected { code: u16, message: String },
    /// Transport or decoding failure
    Unavailable(String),
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::EmptyCity => write!(f, "No city entered"),
            WeatherError::Rejected { code, message } => {
                write!(f, "Weather API error {}: {}", code, message)
            }
            WeatherError::Unavailable(s) => write!(f, "Weather unavailable: {}", s),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<FetchError> for WeatherError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::EmptyCity => WeatherError::EmptyCity,
            FetchError::Api { code, message } => WeatherError::Rejected { code, message },
            other => WeatherError::Unavailable(other.to_string()),
        }
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of one fetch cycle, tagged with the ticket of the search that started it
    FetchDone {
        ticket: u64,
        result: Result<WeatherReport, WeatherError>,
    },
}

/// Request to fetch weather data asynchronously.
/// Sends `FetchDone` on the channel when complete, unless `cancel` fires first.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    runtime: &tokio::runtime::Handle,
    client: Arc<OpenWeatherClient>,
    request: SearchRequest,
    cancel: CancellationToken,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let SearchRequest { ticket, city } = request;
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Weather fetch #{} for {} superseded", ticket, city);
            }
            result = client.fetch_weather(&city) => {
                if let Err(e) = &result {
                    tracing::warn!("Weather fetch #{} for {} failed: {}", ticket, city, e);
                }
                let result = result.map_err(WeatherError::from);
                if tx.send(WeatherServiceMessage::FetchDone { ticket, result }).is_err() {
                    tracing::debug!("Weather result #{} dropped: receiver gone", ticket);
                }
            }
        }
    });
}
