use anyhow::Result;
use std::sync::Arc;

use crate::{Config, FileSettingsStore, SettingsStore};

/// Application configuration plus the settings service shared by the UI.
pub struct App {
    config: Arc<Config>,
    settings_store: Arc<dyn SettingsStore>,
}

impl App {
    /// Validate `config` (warnings are logged) and open its settings file.
    pub fn from_config(config: Config) -> Result<Self> {
        let (config, _validation) = config.into_validated()?;
        let store = FileSettingsStore::new(&config.config_dir);
        tracing::info!("Settings file: {:?}", store.path());
        Ok(Self::with_parts(config, Arc::new(store)))
    }

    pub fn with_parts(config: Config, settings_store: Arc<dyn SettingsStore>) -> Self {
        Self {
            config: Arc::new(config),
            settings_store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings_store(&self) -> Arc<dyn SettingsStore> {
        self.settings_store.clone()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }
}
