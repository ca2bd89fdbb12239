//! Theming and color definitions.
//!
//! Every render function takes a [`Palette`] built from the model's
//! [`ThemeMode`]; nothing reads the theme from global state.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;
use crate::config::ThemeMode;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub tag: Color,
    pub badge: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub popup_bg: Color,
    pub popup_fg: Color,
    pub focus: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
}

impl Palette {
    pub const fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Dark => Self {
                text: Color::Reset,
                dim: Color::Indexed(245),
                accent: Color::Cyan,
                tag: Color::Green,
                badge: Color::Yellow,
                bar_bg: Color::DarkGray,
                bar_fg: Color::White,
                popup_bg: Color::Black,
                popup_fg: Color::White,
                focus: Color::Yellow,
                cursor_bg: Color::White,
                cursor_fg: Color::Black,
            },
            ThemeMode::Light => Self {
                text: Color::Reset,
                dim: Color::Indexed(242),
                accent: Color::Indexed(24),
                tag: Color::Indexed(22),
                badge: Color::Indexed(130),
                bar_bg: Color::Indexed(252),
                bar_fg: Color::Black,
                popup_bg: Color::White,
                popup_fg: Color::Black,
                focus: Color::Indexed(130),
                cursor_bg: Color::Black,
                cursor_fg: Color::White,
            },
        }
    }

    pub fn title(self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim(self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn tag(self) -> Style {
        Style::default().fg(self.tag)
    }

    /// The "Draft" marker next to unpublished titles.
    pub fn badge(self) -> Style {
        Style::default()
            .fg(self.badge)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn bar(self) -> Style {
        Style::default().bg(self.bar_bg).fg(self.bar_fg)
    }

    pub fn popup(self) -> Style {
        Style::default().bg(self.popup_bg).fg(self.popup_fg)
    }

    pub fn section(self) -> Style {
        Style::default()
            .fg(self.focus)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.dim)
        }
    }

    pub fn cursor(self) -> Style {
        Style::default().bg(self.cursor_bg).fg(self.cursor_fg)
    }
}

/// Prefix and style for a toast line.
pub fn toast_style(level: ToastLevel, palette: Palette) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", palette.bar()),
        ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}
