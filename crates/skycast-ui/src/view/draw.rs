//! Paints a [`Screen`] with ratatui widgets.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use super::map::view_bounds;
use super::palette::Palette;
use super::{
    Content, ForecastPanel, MapPanel, Screen, SettingsPanel, SidebarItem, Status, TopBar,
    WeatherPanel,
};

const SIDEBAR_WIDTH: u16 = 18;
const TOGGLE_WIDTH: u16 = 14;
const POPUP_HEIGHT: u16 = 6;

/// Draw the whole dashboard into `frame`.
pub fn draw(frame: &mut Frame, screen: &Screen) {
    let palette = Palette::for_theme(screen.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);
    draw_sidebar(frame, columns[0], &screen.sidebar, &palette);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // city input + theme toggle
            Constraint::Length(1), // status
            Constraint::Min(0),    // tab content
        ])
        .split(columns[1]);
    draw_top_bar(frame, rows[0], &screen.top_bar, &palette);
    draw_status(frame, rows[1], screen.status.as_ref(), &palette);

    match &screen.content {
        Content::Weather(Some(panel)) => draw_weather(frame, rows[2], panel, &palette),
        Content::Weather(None) => draw_empty(
            frame,
            rows[2],
            "Weather",
            "Search for a city to see current conditions.",
            &palette,
        ),
        Content::Forecast(Some(panel)) => draw_forecast(frame, rows[2], panel, &palette),
        Content::Forecast(None) => draw_empty(
            frame,
            rows[2],
            "Forecast",
            "Search for a city to see the forecast.",
            &palette,
        ),
        Content::Map(Some(panel)) => draw_map(frame, rows[2], panel, &palette),
        Content::Map(None) => draw_empty(
            frame,
            rows[2],
            "Map",
            "Search for a city to see it on the map.",
            &palette,
        ),
        Content::Settings(panel) => draw_settings(frame, rows[2], panel, &palette),
    }
}

fn titled_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.base())
        .title(Span::styled(format!(" {} ", title), palette.accent()))
}

fn draw_sidebar(frame: &mut Frame, area: Rect, items: &[SidebarItem], palette: &Palette) {
    let lines: Vec<Line> = items
        .iter()
        .map(|item| {
            let marker = if item.active { "▶ " } else { "  " };
            let style = if item.active {
                palette.accent()
            } else {
                palette.base()
            };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{:<10}", item.label), style),
                Span::styled(item.hotkey, palette.muted()),
            ])
        })
        .collect();

    let sidebar = Paragraph::new(lines).block(titled_block("SkyCast", palette));
    frame.render_widget(sidebar, area);
}

fn draw_top_bar(frame: &mut Frame, area: Rect, top_bar: &TopBar, palette: &Palette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(TOGGLE_WIDTH)])
        .split(area);

    let input = if top_bar.city_input.is_empty() {
        Line::from(Span::styled(top_bar.placeholder, palette.muted()))
    } else {
        Line::from(vec![
            Span::styled(top_bar.city_input.as_str(), palette.base()),
            Span::styled("▏", palette.accent()),
        ])
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.base())
        .title(Span::styled(" City ", palette.accent()))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", top_bar.search_hint),
            palette.muted(),
        )));
    frame.render_widget(Paragraph::new(input).block(input_block), columns[0]);

    let toggle = Paragraph::new(top_bar.theme_toggle)
        .alignment(Alignment::Center)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(Span::styled(" Ctrl-T ", palette.muted())),
        );
    frame.render_widget(toggle, columns[1]);
}

fn draw_status(frame: &mut Frame, area: Rect, status: Option<&Status>, palette: &Palette) {
    let line = match status {
        Some(Status::Error(message)) => {
            Line::from(Span::styled(format!(" ⚠ {}", message), palette.error()))
        }
        Some(Status::Loading(message)) => {
            Line::from(Span::styled(format!(" {}", message), palette.muted()))
        }
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn draw_empty(frame: &mut Frame, area: Rect, title: &str, hint: &str, palette: &Palette) {
    let hint = Paragraph::new(Span::styled(hint, palette.muted()))
        .alignment(Alignment::Center)
        .block(titled_block(title, palette));
    frame.render_widget(hint, area);
}

fn draw_weather(frame: &mut Frame, area: Rect, panel: &WeatherPanel, palette: &Palette) {
    let block = titled_block(&panel.name, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}  {}", panel.icon_glyph, panel.temperature),
            palette.accent(),
        )),
        Line::from(Span::styled(panel.description.as_str(), palette.base())),
        Line::from(Span::styled(panel.icon_url.as_str(), palette.muted())),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(headline, rows[0]);

    let card_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4)])
        .split(rows[1]);
    for (row_area, cards) in card_rows.iter().zip(panel.details.chunks(3)) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, 3); 3])
            .split(*row_area);
        for (cell, card) in cells.iter().zip(cards) {
            let card_widget = Paragraph::new(vec![
                Line::from(Span::styled(card.label, palette.muted())),
                Line::from(Span::styled(card.value.as_str(), palette.accent())),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border()),
            );
            frame.render_widget(card_widget, *cell);
        }
    }
}

fn draw_forecast(frame: &mut Frame, area: Rect, panel: &ForecastPanel, palette: &Palette) {
    let block = titled_block(panel.title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = panel.cards.len().max(1) as u32;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); panel.cards.len()])
        .split(Rect {
            height: inner.height.min(6),
            ..inner
        });

    for (cell, card) in cells.iter().zip(&panel.cards) {
        let card_widget = Paragraph::new(vec![
            Line::from(Span::styled(card.weekday.as_str(), palette.accent())),
            Line::from(card.icon_glyph),
            Line::from(Span::styled(card.temperature.as_str(), palette.base())),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border()),
        );
        frame.render_widget(card_widget, *cell);
    }
}

fn draw_map(frame: &mut Frame, area: Rect, panel: &MapPanel, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(POPUP_HEIGHT),
            Constraint::Length(2),
        ])
        .split(area);

    let (x_bounds, y_bounds) = view_bounds(panel.center, panel.zoom);
    let center = (panel.marker.position.lon, panel.marker.position.lat);
    let badge = Span::styled(format!(" {} ", panel.marker.badge), palette.marker());
    let land = palette.muted;
    let pin = palette.marker;

    let canvas = Canvas::default()
        .block(titled_block(&format!("Map · zoom {}", panel.zoom), palette))
        .background_color(palette.background)
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: land,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &[center],
                color: pin,
            });
            ctx.print(center.0, center.1, Line::from(badge.clone()));
        });
    frame.render_widget(canvas, rows[0]);

    let popup = &panel.popup;
    let popup_widget = Paragraph::new(vec![
        Line::from(Span::styled(popup.title.as_str(), palette.accent())),
        Line::from(format!("{}  {}", popup.icon_glyph, popup.temperature)),
        Line::from(Span::styled(popup.description.as_str(), palette.base())),
        Line::from(Span::styled(popup.icon_url.as_str(), palette.muted())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border())
            .style(palette.base()),
    );
    frame.render_widget(popup_widget, rows[1]);

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(panel.tile_url.as_str(), palette.muted())),
        Line::from(Span::styled(panel.attribution.as_str(), palette.muted())),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(footer, rows[2]);
}

fn draw_settings(frame: &mut Frame, area: Rect, panel: &SettingsPanel, palette: &Palette) {
    let lines: Vec<Line> = panel
        .lines
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), palette.base())))
        .collect();
    let settings = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(titled_block(panel.title, palette));
    frame.render_widget(settings, area);
}
