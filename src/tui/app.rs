//! Main application state and controller
//!
//! Routes input to the modal layer first, then to the memo list, and
//! bridges the list's destructive actions through the confirmation
//! subsystem: each request's pending `Confirmation` is polled from the
//! event loop and acted on once it resolves.

use crate::config::Config;
use crate::memo::{MemoService, Priority};
use crate::tui::{
    components::{
        memo_list::{ListAction, MemoListPage},
        modal::{Confirmation, ModalConfig, ModalManager, OverlaySurface, Severity},
        stats::StatsPanel,
        Component,
    },
    events::Event,
    theme::Theme,
    Frame,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// What to do when a pending confirmation resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmAction {
    DeleteMemo,
    BulkDelete,
    Quit,
}

struct PendingConfirmation {
    confirmation: Confirmation,
    action: ConfirmAction,
}

pub struct App {
    should_quit: bool,
    size: Rect,
    theme: Theme,
    service: Arc<MemoService>,
    list: MemoListPage,
    stats: StatsPanel,
    modals: ModalManager,
    pending: Vec<PendingConfirmation>,
    status_message: Option<String>,
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    pub fn new(config: &Config, event_sender: mpsc::UnboundedSender<Event>) -> Result<Self> {
        let service = Arc::new(MemoService::new(
            config.api_url.clone(),
            config.request_timeout(),
        )?);

        let app = Self {
            should_quit: false,
            size: Rect::default(),
            theme: Theme::default(),
            service,
            list: MemoListPage::new(),
            stats: StatsPanel::new(),
            modals: ModalManager::new(Box::new(OverlaySurface::new())),
            pending: Vec::new(),
            status_message: None,
            event_sender,
        };

        app.reload_memos();
        app.reload_stats();
        Ok(app)
    }

    /// Handle one event; returns true when the app should exit.
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) => self.handle_key(key).await?,

            Event::Mouse(mouse) => {
                // With no modal open the list has no mouse interactions
                if self.modals.has_modals() {
                    self.modals.handle_mouse(mouse);
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
                self.modals.set_area(self.size);
            }

            Event::Tick => self.modals.tick(),

            Event::MemosLoaded(memos) => self.list.set_memos(memos),

            Event::StatsLoaded(stats) => self.stats.set_stats(stats),

            Event::MemoDeleted(id) => {
                self.list.remove_memo(id);
                self.reload_stats();
            }

            Event::MemosUpdated(memos) => {
                self.list.apply_updates(memos);
                self.reload_stats();
            }

            Event::ServiceError(message) => {
                self.list.set_loading(false);
                self.list.set_error(Some(message));
            }
        }

        self.poll_confirmations();
        Ok(self.should_quit)
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The modal layer owns all input while any dialog is open
        if self.modals.handle_key(key) {
            return Ok(());
        }

        // A stale status line gives way to fresh input
        self.status_message = None;

        let is_quit = matches!(key.code, KeyCode::Char('q'))
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if is_quit {
            self.request_quit();
            return Ok(());
        }

        self.list.handle_key_event(key).await?;
        self.process_list_actions();
        Ok(())
    }

    fn process_list_actions(&mut self) {
        for action in self.list.take_actions() {
            match action {
                ListAction::Reload => {
                    self.list.set_loading(true);
                    self.reload_memos();
                }

                ListAction::DeleteRequested { id, title } => {
                    let config = ModalConfig::new(
                        "Delete Memo",
                        format!(
                            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                            title
                        ),
                    )
                    .with_confirm_label("Delete Memo")
                    .with_severity(Severity::Danger)
                    .with_payload(json!({ "memoId": id, "memoTitle": title }));

                    self.open_confirmation(config, ConfirmAction::DeleteMemo);
                }

                ListAction::BulkDeleteRequested { ids } => {
                    let config = ModalConfig::new(
                        "Delete Selected Memos",
                        format!(
                            "Are you sure you want to delete {} memos? This action cannot be undone.",
                            ids.len()
                        ),
                    )
                    .with_confirm_label("Delete All")
                    .with_severity(Severity::Danger)
                    .with_payload(json!({ "memoIds": ids }));

                    self.open_confirmation(config, ConfirmAction::BulkDelete);
                }

                ListAction::SetPriority { id, priority } => self.update_priority(id, priority),

                ListAction::BulkSetPriority { ids, priority } => {
                    self.bulk_update_priority(ids, priority)
                }
            }
        }
    }

    fn open_confirmation(&mut self, config: ModalConfig, action: ConfirmAction) {
        match self.modals.request(config) {
            Ok(confirmation) => self.pending.push(PendingConfirmation {
                confirmation,
                action,
            }),
            Err(e) => {
                // The dialog never appeared; surface that instead of hanging
                warn!("Confirmation dialog failed to open: {}", e);
                self.status_message = Some("Action failed: could not open dialog".to_string());
            }
        }
    }

    fn request_quit(&mut self) {
        let config = ModalConfig::new("Quit", "Are you sure you want to quit?")
            .with_confirm_label("Quit")
            .with_cancel_label("Stay")
            .with_severity(Severity::Warning);
        self.open_confirmation(config, ConfirmAction::Quit);
    }

    /// Poll every pending confirmation and act on the resolved ones.
    fn poll_confirmations(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for mut entry in pending {
            match entry.confirmation.try_outcome() {
                None => self.pending.push(entry),
                Some(outcome) => {
                    if !outcome.confirmed {
                        continue;
                    }
                    match entry.action {
                        ConfirmAction::Quit => {
                            self.modals.close_all();
                            self.should_quit = true;
                        }
                        ConfirmAction::DeleteMemo => {
                            if let Some(id) = outcome.payload["memoId"].as_i64() {
                                self.delete_memo(id);
                            }
                        }
                        ConfirmAction::BulkDelete => {
                            let ids: Vec<i64> = outcome.payload["memoIds"]
                                .as_array()
                                .map(|ids| ids.iter().filter_map(|id| id.as_i64()).collect())
                                .unwrap_or_default();
                            for id in ids {
                                self.delete_memo(id);
                            }
                        }
                    }
                }
            }
        }
    }

    fn reload_memos(&self) {
        let service = self.service.clone();
        let sender = self.event_sender.clone();
        let filter = self.list.filter();
        let sort = self.list.sort();

        tokio::spawn(async move {
            let event = match service.list(filter, Some(sort)).await {
                Ok(memos) => Event::MemosLoaded(memos),
                Err(e) => Event::ServiceError(format!("Failed to load memos: {}", e)),
            };
            let _ = sender.send(event);
        });
    }

    fn reload_stats(&self) {
        let service = self.service.clone();
        let sender = self.event_sender.clone();

        tokio::spawn(async move {
            let event = match service.priority_stats().await {
                Ok(stats) => Event::StatsLoaded(stats),
                Err(e) => Event::ServiceError(format!("Failed to load statistics: {}", e)),
            };
            let _ = sender.send(event);
        });
    }

    fn delete_memo(&self, id: i64) {
        let service = self.service.clone();
        let sender = self.event_sender.clone();

        tokio::spawn(async move {
            let event = match service.delete(id).await {
                Ok(()) => Event::MemoDeleted(id),
                Err(e) => Event::ServiceError(format!("Failed to delete memo: {}", e)),
            };
            let _ = sender.send(event);
        });
    }

    fn update_priority(&self, id: i64, priority: Priority) {
        let service = self.service.clone();
        let sender = self.event_sender.clone();

        tokio::spawn(async move {
            let event = match service.update_priority(id, priority).await {
                Ok(memo) => Event::MemosUpdated(vec![memo]),
                Err(e) => Event::ServiceError(format!("Failed to update priority: {}", e)),
            };
            let _ = sender.send(event);
        });
    }

    fn bulk_update_priority(&self, ids: Vec<i64>, priority: Priority) {
        let service = self.service.clone();
        let sender = self.event_sender.clone();

        tokio::spawn(async move {
            let event = match service.bulk_update_priority(ids, priority).await {
                Ok(memos) => Event::MemosUpdated(memos),
                Err(e) => Event::ServiceError(format!("Failed to update priorities: {}", e)),
            };
            let _ = sender.send(event);
        });
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        self.size = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Stats line
                Constraint::Min(1),    // Memo list
                Constraint::Length(1), // Status bar
            ])
            .split(self.size);

        self.stats.render(frame, chunks[0], &self.theme);
        self.list.render(frame, chunks[1], &self.theme);
        self.render_status_bar(frame, chunks[2]);

        // Modal overlay goes on top of everything
        self.modals.render(frame, self.size, &self.theme);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let text = match (&self.status_message, self.modals.open_count()) {
            (Some(message), _) => message.clone(),
            (None, 0) => "memoterm".to_string(),
            (None, n) => format!("memoterm — {} dialog(s) open", n),
        };

        let status = Paragraph::new(text).style(self.theme.status_bar_style());
        frame.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> (App, mpsc::UnboundedReceiver<Event>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let app = App::new(&Config::default(), sender).unwrap();
        (app, receiver)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[tokio::test]
    async fn test_status_message_clears_on_next_key() {
        let (mut app, _events) = app();
        app.status_message = Some("Action failed: could not open dialog".to_string());

        app.handle_event(Event::Key(key(KeyCode::Down))).await.unwrap();
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_status_message_survives_modal_input() {
        let (mut app, _events) = app();
        app.status_message = Some("Action failed: could not open dialog".to_string());
        app.request_quit();

        // Keys routed to the open dialog leave the status line alone
        app.handle_event(Event::Key(key(KeyCode::Tab))).await.unwrap();
        assert!(app.status_message.is_some());

        app.handle_event(Event::Key(key(KeyCode::Esc))).await.unwrap();
        app.handle_event(Event::Key(key(KeyCode::Down))).await.unwrap();
        assert!(app.status_message.is_none());
    }
}
