//! Application services shared by the UI loop.
//!
//! `AppServices` owns the tokio runtime, the weather client and the channel
//! that carries fetch results back to the UI thread. The UI thread never
//! blocks on network work: it hands searches to [`AppServices::request_weather`]
//! and drains results with [`AppServices::try_recv_weather_message`] each tick.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use skycast_core::Config;
use skycast_weather::OpenWeatherClient;

use crate::models::SearchRequest;
pub use crate::services::WeatherServiceMessage;
use crate::services::request_weather_fetch;

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    weather_client: Arc<OpenWeatherClient>,

    weather_service_tx: std::sync::mpsc::Sender<WeatherServiceMessage>,
    weather_service_rx: Mutex<std::sync::mpsc::Receiver<WeatherServiceMessage>>,

    /// Cancels the in-flight fetch when a newer search starts
    weather_cancel_token: Mutex<Option<CancellationToken>>,
}

impl AppServices {
    /// Build the runtime and weather client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("skycast-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let client = OpenWeatherClient::new(
            &config.weather.api_base_url,
            config.weather.effective_api_key(),
            config.weather.request_timeout_secs.map(Duration::from_secs),
        )
        .context("Failed to create weather client")?;
        tracing::info!(
            "Weather client initialized with base_url: {}",
            config.weather.api_base_url
        );

        Ok(Self::with_client(runtime, client))
    }

    /// Assemble services around an existing runtime and client.
    pub fn with_client(runtime: tokio::runtime::Runtime, client: OpenWeatherClient) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            runtime,
            weather_client: Arc::new(client),
            weather_service_tx: tx,
            weather_service_rx: Mutex::new(rx),
            weather_cancel_token: Mutex::new(None),
        }
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn weather_client(&self) -> Arc<OpenWeatherClient> {
        self.weather_client.clone()
    }

    /// Start a fetch for `request`, cancelling any fetch still in flight.
    pub fn request_weather(&self, request: SearchRequest) {
        let token = CancellationToken::new();
        if let Some(previous) = self.weather_cancel_token.lock().replace(token.clone()) {
            previous.cancel();
        }

        request_weather_fetch(
            &self.weather_service_tx,
            &self.runtime(),
            self.weather_client(),
            request,
            token,
        );
    }

    /// Cancel the fetch in flight, if any. Its result is never sent.
    pub fn cancel_weather(&self) {
        if let Some(token) = self.weather_cancel_token.lock().take() {
            token.cancel();
            tracing::debug!("In-flight weather fetch cancelled");
        }
    }

    /// Try to receive a message from the weather service channel (non-blocking).
    pub fn try_recv_weather_message(&self) -> Option<WeatherServiceMessage> {
        self.weather_service_rx.lock().try_recv().ok()
    }

    /// Cancel outstanding work. Pending results are dropped.
    pub fn shutdown(&self) {
        tracing::info!("AppServices shutdown initiated");
        self.cancel_weather();
        tracing::info!("AppServices shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> AppServices {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let client = OpenWeatherClient::new("http://127.0.0.1:1", None, None).unwrap();
        AppServices::with_client(runtime, client)
    }

    #[test]
    fn test_empty_channel() {
        let svc = services();
        assert!(svc.try_recv_weather_message().is_none());
    }

    #[test]
    fn test_new_request_cancels_previous() {
        let svc = services();
        svc.request_weather(SearchRequest {
            ticket: 1,
            city: "Paris".into(),
        });
        let first = svc.weather_cancel_token.lock().clone().unwrap();
        svc.request_weather(SearchRequest {
            ticket: 2,
            city: "London".into(),
        });
        assert!(first.is_cancelled());

        svc.shutdown();
        assert!(svc.weather_cancel_token.lock().is_none());
    }

    #[test]
    fn test_cancel_weather_cancels_in_flight() {
        let svc = services();
        svc.cancel_weather();

        svc.request_weather(SearchRequest {
            ticket: 1,
            city: "Paris".into(),
        });
        let token = svc.weather_cancel_token.lock().clone().unwrap();
        svc.cancel_weather();
        assert!(token.is_cancelled());
        assert!(svc.weather_cancel_token.lock().is_none());
        assert!(svc.try_recv_weather_message().is_none());
    }

    #[test]
    fn test_new_from_config() {
        let svc = AppServices::new(&Config::default());
        assert!(svc.is_ok());
    }
}
