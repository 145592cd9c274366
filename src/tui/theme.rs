//! Styling palette for the terminal UI

use crate::tui::components::modal::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for selections and focused controls
    pub primary: Color,

    /// Base background
    pub bg_base: Color,

    /// Background for raised surfaces (dialogs, panels)
    pub bg_overlay: Color,

    /// Base foreground text
    pub fg_base: Color,

    /// De-emphasized text
    pub fg_muted: Color,

    /// Default border color
    pub border: Color,

    /// Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            bg_base: Color::Reset,
            bg_overlay: Color::Black,
            fg_base: Color::White,
            fg_muted: Color::DarkGray,
            border: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
        }
    }
}

impl Theme {
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.fg_base)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.bg_overlay).fg(self.fg_muted)
    }

    /// Border and icon styling for a confirmation severity.
    pub fn severity_style(&self, severity: Severity) -> Style {
        let color = match severity {
            Severity::Danger => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        };
        Style::default().fg(color)
    }

    /// Styling for a dialog button, highlighted when focused.
    pub fn button_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(self.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg_base)
        }
    }
}
