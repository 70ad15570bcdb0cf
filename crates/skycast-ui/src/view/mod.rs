//! Presentation: a pure projection of dashboard state into a [`Screen`],
//! and the drawing step that paints it.

pub mod draw;
pub mod forecast;
pub mod format;
pub mod map;
pub mod palette;

use skycast_core::{Theme, UiConfig};
use skycast_weather::{Coordinates, CurrentWeather, WeatherReport};

use crate::models::{DashboardModel, Tab};

pub use draw::draw;
pub use format::{celsius, round_half_up};

/// Icon sizes served by the icon host
const LARGE_ICON_SCALE: u8 = 4;
const SMALL_ICON_SCALE: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub theme: Theme,
    pub sidebar: Vec<SidebarItem>,
    pub top_bar: TopBar,
    pub status: Option<Status>,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub tab: Tab,
    pub label: &'static str,
    pub hotkey: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBar {
    pub city_input: String,
    pub placeholder: &'static str,
    pub search_hint: &'static str,
    pub theme_toggle: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Weather(Option<WeatherPanel>),
    Forecast(Option<ForecastPanel>),
    Map(Option<MapPanel>),
    Settings(SettingsPanel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherPanel {
    pub name: String,
    pub description: String,
    pub temperature: String,
    pub icon_glyph: &'static str,
    pub icon_url: String,
    pub details: Vec<InfoCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub weekday: String,
    pub icon_glyph: &'static str,
    pub icon_url: String,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastPanel {
    pub title: &'static str,
    pub cards: Vec<ForecastCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinates,
    /// Rounded temperature label drawn at the marker
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub icon_glyph: &'static str,
    pub icon_url: String,
    pub temperature: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPanel {
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub marker: Marker,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    pub title: &'static str,
    pub lines: Vec<String>,
}

/// Build the screen for the current state.
pub fn build_screen(model: &DashboardModel, ui: &UiConfig) -> Screen {
    let active = model.active_tab();
    let sidebar = Tab::ALL
        .iter()
        .zip(["F1", "F2", "F3", "F4"])
        .map(|(&tab, hotkey)| SidebarItem {
            tab,
            label: tab.label(),
            hotkey,
            active: tab == active,
        })
        .collect();

    let top_bar = TopBar {
        city_input: model.city_input().to_string(),
        placeholder: "Search city...",
        search_hint: "Enter to search",
        theme_toggle: match model.theme() {
            Theme::Dark => "☀ Light",
            Theme::Light => "🌙 Dark",
        },
    };

    let status = if let Some(message) = model.error() {
        Some(Status::Error(message.to_string()))
    } else {
        model
            .loading_city()
            .map(|city| Status::Loading(format!("Loading weather for {}...", city)))
    };

    let content = match active {
        Tab::Weather => Content::Weather(model.current().map(|c| weather_panel(c, ui))),
        Tab::Forecast => Content::Forecast(model.report().and_then(|r| forecast_panel(r, ui))),
        Tab::Map => Content::Map(model.current().map(|c| map_panel(c, ui))),
        Tab::Settings => Content::Settings(settings_panel(model)),
    };

    Screen {
        theme: model.theme(),
        sidebar,
        top_bar,
        status,
        content,
    }
}

fn weather_panel(current: &CurrentWeather, ui: &UiConfig) -> WeatherPanel {
    WeatherPanel {
        name: current.name.clone(),
        description: current.description.clone(),
        temperature: celsius(current.temperature),
        icon_glyph: current.icon.glyph(),
        icon_url: current.icon.url(&ui.icon_base_url, LARGE_ICON_SCALE),
        details: vec![
            InfoCard {
                label: "Feels Like",
                value: celsius(current.feels_like),
            },
            InfoCard {
                label: "Humidity",
                value: format!("{}%", current.humidity),
            },
            InfoCard {
                label: "Wind Speed",
                value: format!("{} m/s", current.wind_speed),
            },
            InfoCard {
                label: "Pressure",
                value: format!("{} hPa", current.pressure),
            },
            InfoCard {
                label: "Visibility",
                value: format!("{} km", current.visibility_km()),
            },
            InfoCard {
                label: "Cloudiness",
                value: format!("{}%", current.cloudiness),
            },
        ],
    }
}

fn forecast_panel(report: &WeatherReport, ui: &UiConfig) -> Option<ForecastPanel> {
    if report.forecast.is_empty() {
        return None;
    }
    let cards = forecast::daily(&report.forecast)
        .into_iter()
        .map(|entry| ForecastCard {
            weekday: format::short_weekday(entry.timestamp),
            icon_glyph: entry.icon.glyph(),
            icon_url: entry.icon.url(&ui.icon_base_url, SMALL_ICON_SCALE),
            temperature: celsius(entry.temperature),
        })
        .collect();
    Some(ForecastPanel {
        title: "5-Day Forecast",
        cards,
    })
}

fn map_panel(current: &CurrentWeather, ui: &UiConfig) -> MapPanel {
    let temperature = celsius(current.temperature);
    MapPanel {
        center: current.coordinates,
        zoom: ui.map_zoom,
        tile_url: map::tile_url(&ui.tile_url_template, current.coordinates, ui.map_zoom),
        attribution: ui.tile_attribution.clone(),
        marker: Marker {
            position: current.coordinates,
            badge: temperature.clone(),
        },
        popup: Popup {
            title: format!("📍 {}, {}", current.name, current.country),
            icon_glyph: current.icon.glyph(),
            icon_url: current.icon.url(&ui.icon_base_url, SMALL_ICON_SCALE),
            temperature: format!("🌡 {}", temperature),
            description: capitalize(&current.description),
        },
    }
}

fn settings_panel(model: &DashboardModel) -> SettingsPanel {
    let city = &model.settings().city;
    SettingsPanel {
        title: "Settings",
        lines: vec![
            "Theme and last searched city are saved automatically.".to_string(),
            "Restart SkyCast to test.".to_string(),
            String::new(),
            format!("Theme: {}", model.theme().as_str()),
            format!(
                "Last city: {}",
                if city.is_empty() { "(none)" } else { city.as_str() }
            ),
            format!("Saved in: {}", model.settings_location()),
        ],
    }
}

/// Uppercase the first letter of each word: `"light rain"` -> `"Light Rain"`
fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{london_report, london_report_with};
    use skycast_core::{MemorySettingsStore, Settings};
    use std::sync::Arc;

    fn loaded(temp: f64, samples: usize) -> DashboardModel {
        let mut model = DashboardModel::new(Arc::new(MemorySettingsStore::new()));
        model.set_city("London");
        let request = model.commit_search().unwrap();
        model.apply_fetch_result(request.ticket, Ok(london_report_with(temp, samples)));
        model
    }

    fn idle() -> DashboardModel {
        DashboardModel::new(Arc::new(MemorySettingsStore::new()))
    }

    #[test]
    fn london_temperature_is_rounded() {
        let model = loaded(15.3, 40);
        let screen = build_screen(&model, &UiConfig::default());
        match screen.content {
            Content::Weather(Some(panel)) => {
                assert_eq!(panel.name, "London");
                assert_eq!(panel.temperature, "15°C");
                assert_eq!(panel.icon_url, "https://openweathermap.org/img/wn/10d@4x.png");
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn detail_cards_format_units() {
        let model = loaded(15.3, 40);
        let Content::Weather(Some(panel)) = build_screen(&model, &UiConfig::default()).content
        else {
            panic!("expected weather panel");
        };
        let values: Vec<(&str, &str)> = panel
            .details
            .iter()
            .map(|c| (c.label, c.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Feels Like", "15°C"),
                ("Humidity", "81%"),
                ("Wind Speed", "4.63 m/s"),
                ("Pressure", "1012 hPa"),
                ("Visibility", "10 km"),
                ("Cloudiness", "75%"),
            ]
        );
    }

    #[test]
    fn weather_tab_empty_before_search() {
        let screen = build_screen(&idle(), &UiConfig::default());
        assert_eq!(screen.content, Content::Weather(None));
        assert_eq!(screen.status, None);
    }

    #[test]
    fn forecast_tab_shows_five_days() {
        let mut model = loaded(15.3, 40);
        model.select_tab(Tab::Forecast);
        let Content::Forecast(Some(panel)) = build_screen(&model, &UiConfig::default()).content
        else {
            panic!("expected forecast panel");
        };
        let report = london_report_with(15.3, 40);
        let expected: Vec<String> = [0, 8, 16, 24, 32]
            .iter()
            .map(|&i| {
                let ts = report.forecast[i].timestamp;
                ts.with_timezone(&chrono::Local).format("%a").to_string()
            })
            .collect();
        let days: Vec<String> = panel.cards.iter().map(|c| c.weekday.clone()).collect();
        assert_eq!(days, expected);
        let temps: Vec<&str> = panel.cards.iter().map(|c| c.temperature.as_str()).collect();
        assert_eq!(temps, vec!["10°C", "18°C", "26°C", "34°C", "42°C"]);
        assert!(panel.cards[0].icon_url.ends_with("03d@2x.png"));
    }

    #[test]
    fn forecast_tab_with_short_sequence() {
        let mut model = loaded(15.3, 10);
        model.select_tab(Tab::Forecast);
        let Content::Forecast(Some(panel)) = build_screen(&model, &UiConfig::default()).content
        else {
            panic!("expected forecast panel");
        };
        assert_eq!(panel.cards.len(), 2);
    }

    #[test]
    fn forecast_tab_hidden_for_empty_forecast() {
        let mut model = loaded(15.3, 0);
        model.select_tab(Tab::Forecast);
        assert_eq!(
            build_screen(&model, &UiConfig::default()).content,
            Content::Forecast(None)
        );
    }

    #[test]
    fn map_tab_before_search_has_no_map() {
        let mut model = idle();
        model.select_tab(Tab::Map);
        assert_eq!(
            build_screen(&model, &UiConfig::default()).content,
            Content::Map(None)
        );
    }

    #[test]
    fn map_tab_marker_and_popup() {
        let mut model = loaded(15.3, 40);
        model.select_tab(Tab::Map);
        let Content::Map(Some(panel)) = build_screen(&model, &UiConfig::default()).content else {
            panic!("expected map panel");
        };
        assert_eq!(panel.zoom, 10);
        assert_eq!(panel.marker.badge, "15°C");
        assert_eq!(panel.marker.position, london_report(15.3).current.coordinates);
        assert_eq!(panel.popup.title, "📍 London, GB");
        assert_eq!(panel.popup.temperature, "🌡 15°C");
        assert_eq!(panel.popup.description, "Light Rain");
        assert_eq!(panel.tile_url, "https://a.tile.openstreetmap.org/10/511/340.png");
        assert_eq!(panel.attribution, "© OpenStreetMap contributors");
    }

    #[test]
    fn error_status_replaces_data() {
        let mut model = loaded(15.3, 40);
        model.set_city("");
        model.commit_search();
        let screen = build_screen(&model, &UiConfig::default());
        assert_eq!(screen.status, Some(Status::Error("Please enter a city".into())));
        assert_eq!(screen.content, Content::Weather(None));
    }

    #[test]
    fn loading_status_names_city() {
        let mut model = idle();
        model.set_city("Oslo");
        model.commit_search();
        let screen = build_screen(&model, &UiConfig::default());
        assert_eq!(
            screen.status,
            Some(Status::Loading("Loading weather for Oslo...".into()))
        );
    }

    #[test]
    fn sidebar_marks_active_tab() {
        let mut model = idle();
        model.select_tab(Tab::Settings);
        let screen = build_screen(&model, &UiConfig::default());
        let active: Vec<Tab> = screen
            .sidebar
            .iter()
            .filter(|item| item.active)
            .map(|item| item.tab)
            .collect();
        assert_eq!(active, vec![Tab::Settings]);
        assert_eq!(screen.sidebar.len(), 4);
    }

    #[test]
    fn theme_toggle_label_offers_other_theme() {
        let mut model = idle();
        assert_eq!(build_screen(&model, &UiConfig::default()).top_bar.theme_toggle, "☀ Light");
        model.toggle_theme();
        assert_eq!(build_screen(&model, &UiConfig::default()).top_bar.theme_toggle, "🌙 Dark");
    }

    #[test]
    fn settings_tab_reports_saved_values() {
        let store = Arc::new(MemorySettingsStore::with_settings(Settings {
            theme: Theme::Light,
            city: "Lima".into(),
        }));
        let mut model = DashboardModel::new(store);
        model.select_tab(Tab::Settings);
        let Content::Settings(panel) = build_screen(&model, &UiConfig::default()).content else {
            panic!("expected settings panel");
        };
        assert!(panel.lines.contains(&"Theme: light".to_string()));
        assert!(panel.lines.contains(&"Last city: Lima".to_string()));
        assert!(panel.lines.contains(&"Saved in: memory".to_string()));
        assert_eq!(
            panel.lines[0],
            "Theme and last searched city are saved automatically."
        );
    }

    #[test]
    fn capitalizes_words() {
        assert_eq!(capitalize("overcast clouds"), "Overcast Clouds");
        assert_eq!(capitalize(""), "");
    }
}
