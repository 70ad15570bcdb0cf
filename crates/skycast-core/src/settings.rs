//! Persisted user settings: theme and last searched city.
//!
//! Settings are read once at startup and written back after every change.
//! A missing or unreadable settings file is never fatal; defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub city: String,
}

/// Key-value persistence for [`Settings`].
pub trait SettingsStore: Send + Sync {
    /// Load stored settings, falling back to defaults when nothing usable is stored.
    fn load(&self) -> Settings;

    /// Persist settings.
    ///
    /// # Errors
    /// Returns a [`SettingsError`] if the settings could not be encoded or written.
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;

    /// Where settings are kept, for display.
    fn location(&self) -> String;
}

/// JSON file store, one document holding both keys.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub const FILE_NAME: &'static str = "settings.json";

    /// Store located at `<config_dir>/settings.json`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Settings>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).map_err(SettingsError::Read)?;
        Ok(Some(serde_json::from_str(&json)?))
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        match self.read() {
            Ok(Some(settings)) => {
                tracing::debug!("Loaded settings from {:?}", self.path);
                settings
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings at {:?}: {}", self.path, e);
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(SettingsError::Write)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(SettingsError::Write)?;
        tracing::debug!(theme = settings.theme.as_str(), "Saved settings");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store. Counts writes so callers can observe persistence.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    settings: Option<Settings>,
    writes: usize,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated as if `settings` had been saved in an earlier session.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                settings: Some(settings),
                writes: 0,
            }),
        }
    }

    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    pub fn stored(&self) -> Option<Settings> {
        self.inner.lock().settings.clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Settings {
        self.inner.lock().settings.clone().unwrap_or_default()
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let mut inner = self.inner.lock();
        inner.settings = Some(settings.clone());
        inner.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
