//! Memo list page
//!
//! The main screen: a scrollable memo list with priority filtering,
//! sorting, a selection set for bulk updates, and destructive actions
//! that go through the confirmation subsystem. The page itself never
//! performs I/O or opens dialogs; it queues `ListAction`s for the app.

use super::{Component, ComponentState};
use crate::memo::{Memo, Priority};
use crate::tui::{theme::Theme, Frame};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::collections::{HashSet, VecDeque};

/// Sort orders accepted by the backend's `sort` query parameter
const SORT_ORDERS: [&str; 2] = ["createdAt", "priority"];

/// Actions the page asks the app to perform
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    /// Reload the memo list with the current filter and sort
    Reload,

    /// The user asked to delete one memo; needs confirmation
    DeleteRequested { id: i64, title: String },

    /// The user asked to delete every selected memo; needs confirmation
    BulkDeleteRequested { ids: Vec<i64> },

    /// Cycle one memo's priority to the given value
    SetPriority { id: i64, priority: Priority },

    /// Apply a priority to the whole selection
    BulkSetPriority { ids: Vec<i64>, priority: Priority },
}

pub struct MemoListPage {
    state: ComponentState,
    memos: Vec<Memo>,
    cursor: usize,
    selected: HashSet<i64>,
    filter: Option<Priority>,
    sort_index: usize,
    loading: bool,
    error: Option<String>,
    actions: VecDeque<ListAction>,
}

impl MemoListPage {
    pub fn new() -> Self {
        Self {
            state: ComponentState::new(),
            memos: Vec::new(),
            cursor: 0,
            selected: HashSet::new(),
            filter: None,
            sort_index: 0,
            loading: true,
            error: None,
            actions: VecDeque::new(),
        }
    }

    /// Drain the actions queued by input handling.
    pub fn take_actions(&mut self) -> Vec<ListAction> {
        self.actions.drain(..).collect()
    }

    pub fn filter(&self) -> Option<Priority> {
        self.filter
    }

    pub fn sort(&self) -> &'static str {
        SORT_ORDERS[self.sort_index]
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Replace the list contents after a reload.
    pub fn set_memos(&mut self, memos: Vec<Memo>) {
        self.memos = memos;
        self.loading = false;
        self.error = None;
        self.selected.clear();
        self.cursor = self.cursor.min(self.memos.len().saturating_sub(1));
    }

    /// Remove one memo after a successful delete.
    pub fn remove_memo(&mut self, id: i64) {
        self.memos.retain(|memo| memo.id != Some(id));
        self.selected.remove(&id);
        self.cursor = self.cursor.min(self.memos.len().saturating_sub(1));
    }

    /// Merge updated memos back into the list (single or bulk update).
    pub fn apply_updates(&mut self, updated: Vec<Memo>) {
        for memo in updated {
            if let Some(slot) = self.memos.iter_mut().find(|m| m.id == memo.id) {
                *slot = memo;
            }
        }
        self.selected.clear();
    }

    pub fn current_memo(&self) -> Option<&Memo> {
        self.memos.get(self.cursor)
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn move_cursor(&mut self, delta: i64) {
        if self.memos.is_empty() {
            return;
        }
        let len = self.memos.len() as i64;
        self.cursor = (self.cursor as i64 + delta).clamp(0, len - 1) as usize;
    }

    fn toggle_selection(&mut self) {
        if let Some(id) = self.current_memo().and_then(|memo| memo.id) {
            if !self.selected.insert(id) {
                self.selected.remove(&id);
            }
        }
    }

    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => None,
        };
        self.actions.push_back(ListAction::Reload);
    }

    fn cycle_sort(&mut self) {
        self.sort_index = (self.sort_index + 1) % SORT_ORDERS.len();
        self.actions.push_back(ListAction::Reload);
    }

    fn request_delete(&mut self) {
        if let Some(memo) = self.current_memo() {
            if let Some(id) = memo.id {
                self.actions.push_back(ListAction::DeleteRequested {
                    id,
                    title: memo.title.clone(),
                });
            }
        }
    }

    fn request_bulk_delete(&mut self) {
        let ids = self.selected_ids();
        if !ids.is_empty() {
            self.actions
                .push_back(ListAction::BulkDeleteRequested { ids });
        }
    }

    fn cycle_priority(&mut self) {
        if let Some(memo) = self.current_memo() {
            if let Some(id) = memo.id {
                let next = memo.priority.map_or(Priority::Low, |p| p.next());
                self.actions
                    .push_back(ListAction::SetPriority { id, priority: next });
            }
        }
    }

    fn bulk_set_priority(&mut self, priority: Priority) {
        let ids = self.selected_ids();
        if !ids.is_empty() {
            self.actions
                .push_back(ListAction::BulkSetPriority { ids, priority });
        }
    }

    fn priority_span<'a>(&self, memo: &Memo, theme: &'a Theme) -> Span<'a> {
        match memo.priority {
            Some(Priority::High) => Span::styled("HIGH  ", Style::default().fg(theme.error)),
            Some(Priority::Medium) => Span::styled("MEDIUM", Style::default().fg(theme.warning)),
            Some(Priority::Low) => Span::styled("LOW   ", Style::default().fg(theme.success)),
            None => Span::styled("      ", theme.muted_style()),
        }
    }
}

impl Default for MemoListPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Component for MemoListPage {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Char(' ') => self.toggle_selection(),
            KeyCode::Char('c') => self.selected.clear(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('D') => self.request_bulk_delete(),
            KeyCode::Char('p') => self.cycle_priority(),
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('s') => self.cycle_sort(),
            KeyCode::Char('r') => self.actions.push_back(ListAction::Reload),
            KeyCode::Char('H') => self.bulk_set_priority(Priority::High),
            KeyCode::Char('M') => self.bulk_set_priority(Priority::Medium),
            KeyCode::Char('L') => self.bulk_set_priority(Priority::Low),
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let title = match self.filter {
            Some(priority) => format!(" Memos ({}) — sort: {} ", priority.label(), self.sort()),
            None => format!(" Memos — sort: {} ", self.sort()),
        };

        let items: Vec<ListItem> = self
            .memos
            .iter()
            .map(|memo| {
                let marker = match memo.id {
                    Some(id) if self.selected.contains(&id) => "[x] ",
                    _ => "[ ] ",
                };
                let date = memo
                    .created_at
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();

                ListItem::new(Line::from(vec![
                    Span::styled(marker, theme.muted_style()),
                    self.priority_span(memo, theme),
                    Span::raw(" "),
                    Span::styled(memo.title.clone(), theme.text_style()),
                    Span::styled(format!("  {}", date), theme.muted_style()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border))
                    .title(title),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.primary)
                    .fg(ratatui::style::Color::Black),
            );

        let mut list_state = ListState::default();
        if !self.memos.is_empty() {
            list_state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        let footer = if let Some(error) = &self.error {
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            ))
        } else if self.loading {
            Line::from(Span::styled("Loading…", theme.muted_style()))
        } else {
            Line::from(Span::styled(
                "j/k: move • space: select • d: delete • D: delete selected • p: priority • H/M/L: bulk priority • f: filter • s: sort • r: reload • q: quit",
                theme.muted_style(),
            ))
        };
        frame.render_widget(Paragraph::new(footer), chunks[1]);
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn memo(id: i64, title: &str, priority: Option<Priority>) -> Memo {
        Memo {
            id: Some(id),
            title: title.to_string(),
            content: String::new(),
            priority,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_delete_key_queues_confirmation_request() {
        let mut page = MemoListPage::new();
        page.set_memos(vec![memo(1, "First", None), memo(2, "Second", None)]);

        page.handle_key_event(key(KeyCode::Down)).await.unwrap();
        page.handle_key_event(key(KeyCode::Char('d'))).await.unwrap();

        assert_eq!(
            page.take_actions(),
            vec![ListAction::DeleteRequested {
                id: 2,
                title: "Second".to_string()
            }]
        );
        // Draining leaves the queue empty
        assert!(page.take_actions().is_empty());
    }

    #[tokio::test]
    async fn test_selection_drives_bulk_actions() {
        let mut page = MemoListPage::new();
        page.set_memos(vec![memo(1, "a", None), memo(2, "b", None)]);

        page.handle_key_event(key(KeyCode::Char(' '))).await.unwrap();
        page.handle_key_event(key(KeyCode::Down)).await.unwrap();
        page.handle_key_event(key(KeyCode::Char(' '))).await.unwrap();
        page.handle_key_event(key(KeyCode::Char('H'))).await.unwrap();

        assert_eq!(
            page.take_actions(),
            vec![ListAction::BulkSetPriority {
                ids: vec![1, 2],
                priority: Priority::High
            }]
        );
    }

    #[tokio::test]
    async fn test_bulk_actions_require_selection() {
        let mut page = MemoListPage::new();
        page.set_memos(vec![memo(1, "a", None)]);

        page.handle_key_event(key(KeyCode::Char('D'))).await.unwrap();
        page.handle_key_event(key(KeyCode::Char('M'))).await.unwrap();
        assert!(page.take_actions().is_empty());
    }

    #[tokio::test]
    async fn test_priority_cycles_from_none_to_low() {
        let mut page = MemoListPage::new();
        page.set_memos(vec![memo(1, "a", None)]);

        page.handle_key_event(key(KeyCode::Char('p'))).await.unwrap();
        assert_eq!(
            page.take_actions(),
            vec![ListAction::SetPriority {
                id: 1,
                priority: Priority::Low
            }]
        );
    }

    #[tokio::test]
    async fn test_filter_cycle_triggers_reload() {
        let mut page = MemoListPage::new();
        assert_eq!(page.filter(), None);

        page.handle_key_event(key(KeyCode::Char('f'))).await.unwrap();
        assert_eq!(page.filter(), Some(Priority::Low));
        assert_eq!(page.take_actions(), vec![ListAction::Reload]);
    }

    #[test]
    fn test_remove_memo_clamps_cursor() {
        let mut page = MemoListPage::new();
        page.set_memos(vec![memo(1, "a", None), memo(2, "b", None)]);
        page.cursor = 1;

        page.remove_memo(2);
        assert_eq!(page.cursor, 0);
        assert_eq!(page.memos.len(), 1);
    }
}
