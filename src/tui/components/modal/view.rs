//! Confirmation dialog view
//!
//! A self-contained interactive surface with two outcomes (confirm, cancel)
//! and four equivalent cancellation triggers: the cancel button, the close
//! affordance, a click on the backdrop outside the dialog box, and the
//! Escape key. The view emits its outcome exactly once, followed by a
//! terminal `Closed` signal, on every exit path.

use super::types::{ModalConfig, ModalOutcome, Severity};
use crate::tui::{theme::Theme, Frame};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, Paragraph, Wrap},
};

/// Number of ticks before keyboard focus settles on the cancel control,
/// so keyboard users land on the non-destructive choice by default.
const SETTLE_TICKS: u8 = 3;

const DEFAULT_CONFIRM_LABEL: &str = "Confirm";
const DEFAULT_CANCEL_LABEL: &str = "Cancel";

/// Signals emitted by the view toward its owner.
///
/// For every exit path the emission order is `Outcome` then `Closed`, and
/// each is emitted at most once per instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The terminal outcome of this dialog
    Outcome(ModalOutcome),

    /// The instance is done and can be torn down
    Closed,
}

/// The two interactive controls of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Confirm,
    Cancel,
}

/// Result of resolving a mouse position against the dialog layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    ConfirmButton,
    CancelButton,
    CloseButton,
    /// Inside the dialog box but not on a control; never cancels
    Content,
    /// Outside the dialog box; cancels
    Backdrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewState {
    Open,
    Closed,
}

/// Computed screen geometry for one dialog instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalLayout {
    /// Dialog box including the border
    pub dialog: Rect,

    /// Inner area excluding the border
    pub content: Rect,

    pub confirm_button: Rect,
    pub cancel_button: Rect,

    /// Close affordance on the top border
    pub close_button: Rect,
}

/// Interactive confirmation dialog for one request.
pub struct ConfirmationModal {
    title: String,
    message: String,
    confirm_label: String,
    cancel_label: String,
    severity: Severity,
    payload: serde_json::Value,

    state: ViewState,
    selected: DialogButton,
    settle_ticks: u8,

    area: Rect,
    layout: ModalLayout,
}

impl ConfirmationModal {
    /// Create a view from a request config, substituting defaults for any
    /// unset labels.
    pub fn new(config: ModalConfig) -> Self {
        Self {
            title: config.title,
            message: config.message,
            confirm_label: config
                .confirm_label
                .unwrap_or_else(|| DEFAULT_CONFIRM_LABEL.to_string()),
            cancel_label: config
                .cancel_label
                .unwrap_or_else(|| DEFAULT_CANCEL_LABEL.to_string()),
            severity: config.severity,
            payload: config.payload,
            state: ViewState::Open,
            selected: DialogButton::Cancel,
            settle_ticks: SETTLE_TICKS,
            area: Rect::default(),
            layout: ModalLayout::default(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn confirm_label(&self) -> &str {
        &self.confirm_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    pub fn layout(&self) -> &ModalLayout {
        &self.layout
    }

    pub fn is_closed(&self) -> bool {
        self.state == ViewState::Closed
    }

    /// Whether keyboard focus has settled on the cancel control yet.
    pub fn focus_settled(&self) -> bool {
        self.settle_ticks == 0
    }

    /// Advance the settle countdown. No other time-driven behavior exists.
    pub fn tick(&mut self) {
        self.settle_ticks = self.settle_ticks.saturating_sub(1);
    }

    /// Update the surface area this dialog is hosted in and recompute the
    /// dialog geometry.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.layout = compute_layout(area, &self.message);
    }

    /// Fire the confirm trigger.
    pub fn confirm(&mut self) -> Vec<Signal> {
        self.finish(ModalOutcome::confirmed(self.payload.clone()))
    }

    /// Fire the cancel trigger. All four cancellation paths funnel here.
    pub fn cancel(&mut self) -> Vec<Signal> {
        self.finish(ModalOutcome::cancelled(self.payload.clone()))
    }

    fn finish(&mut self, outcome: ModalOutcome) -> Vec<Signal> {
        if self.state == ViewState::Closed {
            return Vec::new();
        }
        self.state = ViewState::Closed;
        vec![Signal::Outcome(outcome), Signal::Closed]
    }

    fn activate_selected(&mut self) -> Vec<Signal> {
        match self.selected {
            DialogButton::Confirm => self.confirm(),
            DialogButton::Cancel => self.cancel(),
        }
    }

    fn toggle_selection(&mut self) {
        self.selected = match self.selected {
            DialogButton::Confirm => DialogButton::Cancel,
            DialogButton::Cancel => DialogButton::Confirm,
        };
        // User navigation overrides the settle delay
        self.settle_ticks = 0;
    }

    /// Handle a key event while the dialog is mounted.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Signal> {
        if self.state == ViewState::Closed {
            return Vec::new();
        }

        match key.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                Vec::new()
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.cancel(),
            _ => Vec::new(),
        }
    }

    /// Handle a mouse event while the dialog is mounted.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<Signal> {
        if self.state == ViewState::Closed {
            return Vec::new();
        }

        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Vec::new();
        }

        match self.hit_test(mouse.column, mouse.row) {
            Hit::ConfirmButton => self.confirm(),
            Hit::CancelButton | Hit::CloseButton | Hit::Backdrop => self.cancel(),
            Hit::Content => Vec::new(),
        }
    }

    /// Resolve a screen position against the dialog geometry.
    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        if contains(self.layout.close_button, column, row) {
            Hit::CloseButton
        } else if contains(self.layout.confirm_button, column, row) {
            Hit::ConfirmButton
        } else if contains(self.layout.cancel_button, column, row) {
            Hit::CancelButton
        } else if contains(self.layout.dialog, column, row) {
            Hit::Content
        } else {
            Hit::Backdrop
        }
    }

    /// Render the dialog into the given surface area.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.set_area(area);
        let layout = self.layout;

        frame.render_widget(Clear, layout.dialog);

        let border_style = theme.severity_style(self.severity);
        let title = Line::from(vec![
            Span::styled(format!(" {} ", icon_glyph(self.severity.icon())), border_style),
            Span::styled(self.title.clone(), theme.text_style()),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .title(Title::from(" ✕ ").alignment(Alignment::Right));

        frame.render_widget(block, layout.dialog);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(layout.content);

        let message = Paragraph::new(self.message.clone())
            .style(theme.text_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        self.render_buttons(frame, theme);
    }

    fn render_buttons(&self, frame: &mut Frame, theme: &Theme) {
        let confirm_focused = self.focus_settled() && self.selected == DialogButton::Confirm;
        let cancel_focused = self.focus_settled() && self.selected == DialogButton::Cancel;

        let confirm = Paragraph::new(format!(" {} ", self.confirm_label))
            .style(theme.button_style(confirm_focused))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(confirm, self.layout.confirm_button);

        let cancel = Paragraph::new(format!(" {} ", self.cancel_label))
            .style(theme.button_style(cancel_focused))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(cancel, self.layout.cancel_button);
    }
}

/// Map an icon name to the glyph rendered in the title bar.
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "alert-triangle" => "⚠",
        "alert-circle" => "‼",
        _ => "ℹ",
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// Compute the dialog geometry for a surface area. The dialog never
/// exceeds the surface, however small the terminal is.
fn compute_layout(area: Rect, message: &str) -> ModalLayout {
    let width = area.width.saturating_sub(4).min(56).max(24).min(area.width);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let message_lines = textwrap::wrap(message, text_width).len().max(1) as u16;

    // message + padding + button row + borders
    let height = (message_lines + 1 + 3 + 2).min(area.height);

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let dialog = Rect::new(x, y, width, height).intersection(area);

    let content = Rect {
        x: dialog.x + 1,
        y: dialog.y + 1,
        width: dialog.width.saturating_sub(2),
        height: dialog.height.saturating_sub(2),
    };

    let button_row = Rect {
        x: content.x,
        y: (content.y + content.height).saturating_sub(3),
        width: content.width,
        height: 3,
    };
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(button_row);

    let close_button = Rect {
        x: (dialog.x + dialog.width).saturating_sub(4),
        y: dialog.y,
        width: 3,
        height: 1,
    };

    ModalLayout {
        dialog,
        content,
        confirm_button: halves[0],
        cancel_button: halves[1],
        close_button,
    }
}
