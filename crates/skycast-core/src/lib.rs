pub mod app;
pub mod config;
pub mod error;
pub mod settings;

pub use app::App;
pub use config::{Config, UiConfig, ValidationResult, WeatherConfig};
pub use error::{
    AppError, ConfigError, SettingsError, WeatherError, CITY_REQUIRED_MESSAGE,
    FETCH_FAILED_MESSAGE,
};
pub use settings::{FileSettingsStore, MemorySettingsStore, Settings, SettingsStore, Theme};

use anyhow::{Context, Result};
use std::path::Path;

/// Initialize tracing.
///
/// With `log_file`, output is appended there without ANSI colors, which keeps
/// the terminal clear while the dashboard owns the screen.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let installed = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).context("Failed to create log directory")?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context("Failed to open log file")?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("SkyCast core initialized");
    Ok(())
}
