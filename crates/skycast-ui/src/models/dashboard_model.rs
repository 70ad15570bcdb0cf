//! Dashboard view state: selected tab, fetch cycle, theme and city text.
//!
//! Every transition triggered by user input or by a finished fetch goes
//! through [`DashboardModel`]. Network work is not done here; a committed
//! search yields a [`SearchRequest`] that the weather service runs, and the
//! outcome comes back through [`DashboardModel::apply_fetch_result`].

use std::sync::Arc;

use skycast_core::{AppError, Settings, SettingsStore, Theme};
use skycast_weather::{CurrentWeather, ForecastEntry, WeatherReport};

use crate::services::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Weather,
    Forecast,
    Map,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Weather, Tab::Forecast, Tab::Map, Tab::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Weather => "Weather",
            Tab::Forecast => "Forecast",
            Tab::Map => "Map",
            Tab::Settings => "Settings",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Weather => 0,
            Tab::Forecast => 1,
            Tab::Map => 2,
            Tab::Settings => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// State of the most recent fetch cycle. Weather data and an error message
/// are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading { ticket: u64, city: String },
    Loaded(WeatherReport),
    Failed(String),
}

/// A committed search for the weather service to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: u64,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub active_tab: Tab,
    pub fetch: FetchState,
}

pub struct DashboardModel {
    view: ViewState,
    settings: Settings,
    city_input: String,
    store: Arc<dyn SettingsStore>,
    last_ticket: u64,
}

impl DashboardModel {
    /// Load persisted settings and prefill the city field with the last city.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        let settings = store.load();
        tracing::debug!(
            theme = settings.theme.as_str(),
            city = %settings.city,
            "Dashboard state restored"
        );
        Self {
            view: ViewState::default(),
            city_input: settings.city.clone(),
            settings,
            store,
            last_ticket: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn active_tab(&self) -> Tab {
        self.view.active_tab
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_location(&self) -> String {
        self.store.location()
    }

    pub fn city_input(&self) -> &str {
        &self.city_input
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.view.fetch {
            FetchState::Loaded(report) => Some(report),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&CurrentWeather> {
        self.report().map(|r| &r.current)
    }

    pub fn forecast(&self) -> &[ForecastEntry] {
        self.report().map(|r| r.forecast.as_slice()).unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.view.fetch {
            FetchState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn loading_city(&self) -> Option<&str> {
        match &self.view.fetch {
            FetchState::Loading { city, .. } => Some(city.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading_city().is_some()
    }

    /// Update the pending city text. Does not fetch or persist.
    pub fn set_city(&mut self, text: impl Into<String>) {
        self.city_input = text.into();
    }

    pub fn push_city_char(&mut self, c: char) {
        let mut text = std::mem::take(&mut self.city_input);
        text.push(c);
        self.set_city(text);
    }

    pub fn pop_city_char(&mut self) {
        let mut text = std::mem::take(&mut self.city_input);
        text.pop();
        self.set_city(text);
    }

    /// Start a fetch cycle for the current city text.
    ///
    /// Previous data and error are cleared immediately. Returns `None` (and
    /// records the validation error) when the city is blank.
    pub fn commit_search(&mut self) -> Option<SearchRequest> {
        let city = self.city_input.trim().to_string();
        if city.is_empty() {
            self.view.fetch = FetchState::Failed(Self::message_for(WeatherError::EmptyCity));
            return None;
        }

        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.view.fetch = FetchState::Loading {
            ticket,
            city: city.clone(),
        };
        tracing::info!("Search #{} for {}", ticket, city);

        if self.settings.city != city {
            self.settings.city = city.clone();
            self.persist();
        }

        Some(SearchRequest { ticket, city })
    }

    /// Apply a finished fetch. Results for any ticket other than the one
    /// currently loading are discarded; returns whether the result was applied.
    pub fn apply_fetch_result(
        &mut self,
        ticket: u64,
        result: Result<WeatherReport, WeatherError>,
    ) -> bool {
        match &self.view.fetch {
            FetchState::Loading { ticket: current, .. } if *current == ticket => {}
            _ => {
                tracing::debug!("Discarding stale weather result #{}", ticket);
                return false;
            }
        }

        self.view.fetch = match result {
            Ok(report) => FetchState::Loaded(report),
            Err(e) => FetchState::Failed(Self::message_for(e)),
        };
        true
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.view.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.view.active_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.view.active_tab.previous());
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        self.persist();
    }

    fn message_for(e: WeatherError) -> String {
        AppError::from(e).user_message().to_string()
    }

    /// Save failures are logged only; the dashboard keeps working in memory.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}
