//! Terminal event loop: keys in, model transitions, fetch results drained
//! each tick, screen redrawn.

use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use skycast_core::UiConfig;

use crate::app_services::{AppServices, WeatherServiceMessage};
use crate::input::{action_for, Action};
use crate::models::{DashboardModel, SearchRequest};
use crate::view::{build_screen, draw};

/// What the loop must do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(SearchRequest),
    /// Search rejected before sending; drop any fetch still running
    CancelFetch,
    Quit,
}

pub fn handle_action(model: &mut DashboardModel, action: Action) -> Effect {
    match action {
        Action::Insert(c) => model.push_city_char(c),
        Action::Backspace => model.pop_city_char(),
        Action::Search => {
            return model
                .commit_search()
                .map_or(Effect::CancelFetch, Effect::Fetch);
        }
        Action::NextTab => model.next_tab(),
        Action::PreviousTab => model.previous_tab(),
        Action::SelectTab(tab) => model.select_tab(tab),
        Action::ToggleTheme => model.toggle_theme(),
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}

/// Apply a message from the weather service. Returns whether the view changed.
pub fn apply_message(model: &mut DashboardModel, message: WeatherServiceMessage) -> bool {
    match message {
        WeatherServiceMessage::FetchDone { ticket, result } => {
            model.apply_fetch_result(ticket, result)
        }
    }
}

/// Run until the user quits.
pub fn run(
    terminal: &mut DefaultTerminal,
    model: &mut DashboardModel,
    services: &AppServices,
    ui: &UiConfig,
) -> Result<()> {
    let tick = Duration::from_millis(ui.tick_millis);
    tracing::info!("Dashboard loop started (tick {:?})", tick);

    loop {
        while let Some(message) = services.try_recv_weather_message() {
            apply_message(model, message);
        }

        let screen = build_screen(model, ui);
        terminal
            .draw(|frame| draw(frame, &screen))
            .context("Failed to draw dashboard")?;

        if !event::poll(tick).context("Failed to poll terminal events")? {
            continue;
        }
        let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
            continue;
        };
        let Some(action) = action_for(key) else {
            continue;
        };

        match handle_action(model, action) {
            Effect::None => {}
            Effect::Fetch(request) => services.request_weather(request),
            Effect::CancelFetch => services.cancel_weather(),
            Effect::Quit => break,
        }
    }

    tracing::info!("Dashboard loop finished");
    Ok(())
}
