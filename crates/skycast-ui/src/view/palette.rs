use ratatui::style::{Color, Modifier, Style};
use skycast_core::Theme;

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub error: Color,
    pub marker: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(15, 23, 42),
                foreground: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(148, 163, 184),
                accent: Color::Rgb(56, 189, 248),
                border: Color::Rgb(51, 65, 85),
                error: Color::Rgb(248, 113, 113),
                marker: Color::Rgb(251, 191, 36),
            },
            Theme::Light => Self {
                background: Color::Rgb(248, 250, 252),
                foreground: Color::Rgb(15, 23, 42),
                muted: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(2, 132, 199),
                border: Color::Rgb(203, 213, 225),
                error: Color::Rgb(220, 38, 38),
                marker: Color::Rgb(217, 119, 6),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::new().fg(self.foreground).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        self.base().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        self.base().fg(self.border)
    }

    pub fn error(&self) -> Style {
        self.base().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn marker(&self) -> Style {
        Style::new()
            .fg(self.background)
            .bg(self.marker)
            .add_modifier(Modifier::BOLD)
    }
}
