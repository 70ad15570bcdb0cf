//! Centralized error types for SkyCast.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Errors from the weather and UI crates convert into this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Settings(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Persisted settings errors (theme / last city).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write settings: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SettingsError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SettingsError::Read(_) => "Saved settings could not be read. Using defaults.",
            SettingsError::Write(_) | SettingsError::Encode(_) => {
                "Settings could not be saved."
            }
        }
    }
}

/// Weather service errors.
///
/// `Rejected` carries the weather API's own message, which is shown verbatim.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City required")]
    CityRequired,

    #[error("Weather API rejected request ({code}): {message}")]
    Rejected { code: u16, message: String },

    #[error("Weather data unavailable: {0}")]
    Unavailable(String),
}

/// Message shown whenever weather data could not be retrieved or decoded.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Message shown when a search is committed without a city.
pub const CITY_REQUIRED_MESSAGE: &str = "Please enter a city";

impl WeatherError {
    pub fn user_message(&self) -> &str {
        match self {
            WeatherError::CityRequired => CITY_REQUIRED_MESSAGE,
            WeatherError::Rejected { message, .. } if !message.is_empty() => message.as_str(),
            WeatherError::Rejected { .. } | WeatherError::Unavailable(_) => FETCH_FAILED_MESSAGE,
        }
    }
}
