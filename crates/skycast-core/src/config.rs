use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (settings, log file)
    pub config_dir: PathBuf,

    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Dashboard presentation settings
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the OpenWeatherMap 2.5 API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// OpenWeatherMap API key (overridden by `OPENWEATHER_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

impl WeatherConfig {
    /// API key from the environment, else from the config file.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Zoom level of the map tab (slippy-map levels 0-19)
    #[serde(default = "default_map_zoom")]
    pub map_zoom: u8,

    /// Tile server URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders
    #[serde(default = "default_tile_url_template")]
    pub tile_url_template: String,

    /// Attribution shown with map tiles
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,

    /// Base URL for weather condition icons
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// How often the event loop polls for input and fetch results
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_map_zoom() -> u8 {
    10
}

fn default_tile_url_template() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_tile_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

fn default_icon_base_url() -> String {
    "https://openweathermap.org/img/wn".to_string()
}

fn default_tick_millis() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            map_zoom: default_map_zoom(),
            tile_url_template: default_tile_url_template(),
            tile_attribution: default_tile_attribution(),
            icon_base_url: default_icon_base_url(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Validate an already loaded configuration, logging warnings.
    pub fn into_validated(self) -> Result<(Self, ValidationResult)> {
        let config = self;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);
        self.validate_url(&self.ui.icon_base_url, "ui.icon_base_url", &mut result);

        if self.weather.effective_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured; set it here or via {}", API_KEY_ENV),
            );
        }

        if self.weather.request_timeout_secs == Some(0) {
            result.add_error(
                "weather.request_timeout_secs",
                "Timeout must be greater than 0 (omit it to disable)",
            );
        }

        if self.ui.map_zoom > 19 {
            result.add_error("ui.map_zoom", "Map zoom must be between 0 and 19");
        }

        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.ui.tile_url_template.contains(placeholder) {
                result.add_error(
                    "ui.tile_url_template",
                    format!("Template is missing the {} placeholder", placeholder),
                );
            }
        }

        if self.ui.tick_millis == 0 {
            result.add_error("ui.tick_millis", "Tick interval must be greater than 0");
        } else if self.ui.tick_millis > 1000 {
            result.add_warning("ui.tick_millis", "Tick interval above 1s makes input sluggish");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the append-only log file
    pub fn log_path(&self) -> PathBuf {
        self.config_dir.join("skycast.log")
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skycast");

        Ok(config_dir.join("config.toml"))
    }
}
