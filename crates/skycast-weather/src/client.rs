//! OpenWeatherMap client: current conditions, then the 5-day / 3-hour forecast.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::api::{check_status, CurrentResponse, ForecastResponse};
use crate::types::{FetchError, WeatherReport};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Build a client. `timeout` of `None` leaves requests unbounded.
    ///
    /// # Errors
    /// Fails if `base_url` does not parse or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: Url::parse(base_url.trim_end_matches('/'))?,
            api_key,
        })
    }

    /// Fetch current conditions and the forecast for `city`.
    ///
    /// The forecast is requested only after current conditions succeed.
    ///
    /// # Errors
    /// `EmptyCity` for a blank city (no request is made), `Api` when the API
    /// reports a failure status, `Transport` / `Parse` otherwise.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let body = self.get_json("weather", city).await?;
        check_status(&body)?;
        let current = serde_json::from_value::<CurrentResponse>(body)?.into_current()?;
        tracing::debug!("Current conditions for {}: {:.1}°C", current.name, current.temperature);

        let body = self.get_json("forecast", city).await?;
        check_status(&body)?;
        let forecast = serde_json::from_value::<ForecastResponse>(body)?.into_entries()?;
        tracing::info!("Fetched weather for {} ({} forecast samples)", city, forecast.len());

        Ok(WeatherReport { current, forecast })
    }

    fn endpoint_url(&self, endpoint: &str, city: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", city).append_pair("units", UNITS);
            if let Some(key) = &self.api_key {
                query.append_pair("appid", key);
            }
        }
        url
    }

    /// The body is decoded whatever the HTTP status; failures are signalled
    /// in-band through `cod`.
    async fn get_json(&self, endpoint: &str, city: &str) -> Result<Value, FetchError> {
        let response = self.client.get(self.endpoint_url(endpoint, city)).send().await?;
        tracing::debug!("GET /{} -> {}", endpoint, response.status());
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
