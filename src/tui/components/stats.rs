//! Priority statistics panel
//!
//! Presentational only: renders the aggregate counts the backend reports.

use super::{Component, ComponentState};
use crate::memo::PriorityStats;
use crate::tui::components::modal::Severity;
use crate::tui::{theme::Theme, Frame};
use async_trait::async_trait;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

pub struct StatsPanel {
    state: ComponentState,
    stats: Option<PriorityStats>,
}

impl StatsPanel {
    pub fn new() -> Self {
        Self {
            state: ComponentState::new(),
            stats: None,
        }
    }

    pub fn set_stats(&mut self, stats: PriorityStats) {
        self.stats = Some(stats);
    }
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Component for StatsPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let line = match &self.stats {
            Some(stats) => Line::from(vec![
                Span::styled(format!("{} memos", stats.total_memos), theme.text_style()),
                Span::styled("  High: ", theme.muted_style()),
                Span::styled(
                    stats.count("HIGH").to_string(),
                    theme.severity_style(Severity::Danger),
                ),
                Span::styled("  Medium: ", theme.muted_style()),
                Span::styled(
                    stats.count("MEDIUM").to_string(),
                    theme.severity_style(Severity::Warning),
                ),
                Span::styled("  Low: ", theme.muted_style()),
                Span::styled(stats.count("LOW").to_string(), theme.text_style()),
                Span::styled("  Most common: ", theme.muted_style()),
                Span::styled(stats.most_common_priority.clone(), theme.text_style()),
            ]),
            None => Line::from(Span::styled("Loading statistics…", theme.muted_style())),
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }
}
