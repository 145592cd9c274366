//! Modal manager for dialog lifecycle and pending confirmations
//!
//! The manager owns the set of live confirmation dialogs. For each request
//! it creates a view, attaches it to the surface, registers its handle in
//! the open set and stores the resolver for the returned `Confirmation`.
//! Teardown (detach + removal + resolution) happens exactly once per
//! instance no matter which exit path fired.

use super::{
    surface::ModalSurface,
    types::{ModalConfig, ModalId, ModalOutcome, ModalResult},
    view::{ConfirmationModal, Signal},
};
use crate::tui::{theme::Theme, Frame};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Block,
};
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;
use tracing::debug;

/// Pending resolution of one confirmation request.
///
/// Resolves exactly once with the dialog's outcome. If the owning manager
/// goes away with the request still open, the confirmation resolves as a
/// cancel outcome carrying the original payload, so awaiting it can never
/// hang.
pub struct Confirmation {
    receiver: oneshot::Receiver<ModalOutcome>,
    fallback_payload: serde_json::Value,
}

impl Confirmation {
    /// Non-blocking poll for the outcome, for callers living inside a
    /// synchronous event loop turn.
    pub fn try_outcome(&mut self) -> Option<ModalOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Closed) => Some(ModalOutcome::cancelled(
                std::mem::take(&mut self.fallback_payload),
            )),
            Err(oneshot::error::TryRecvError::Empty) => None,
        }
    }
}

impl Future for Confirmation {
    type Output = ModalOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(ModalOutcome::cancelled(std::mem::take(
                &mut self.fallback_payload,
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}

struct ModalEntry {
    view: ConfirmationModal,
    resolver: Option<oneshot::Sender<ModalOutcome>>,
}

/// Owner of all live confirmation dialogs and their pending results.
pub struct ModalManager {
    /// Open handles in insertion order (last = topmost)
    open: Vec<ModalId>,

    /// Live instances and their resolvers, keyed by handle
    entries: HashMap<ModalId, ModalEntry>,

    /// Attachment boundary to the hosting UI environment
    surface: Box<dyn ModalSurface>,

    /// Background scroll suppression marker, toggled only on 0<->1
    /// transitions of the open set
    scroll_locked: bool,

    /// Last known surface area
    area: Rect,
}

impl ModalManager {
    pub fn new(surface: Box<dyn ModalSurface>) -> Self {
        Self {
            open: Vec::new(),
            entries: HashMap::new(),
            surface,
            scroll_locked: false,
            area: Rect::default(),
        }
    }

    /// Open a confirmation dialog and return its pending resolution.
    ///
    /// The instance is attached to the surface before its handle enters
    /// the open set, so `open_count()` never reports an instance that
    /// cannot receive input. If attachment fails the error is returned
    /// immediately and nothing is registered.
    pub fn request(&mut self, config: ModalConfig) -> ModalResult<Confirmation> {
        let id = ModalId::new();
        debug!(
            "Opening confirmation '{}' ({}) as {}",
            config.title,
            config.severity.class(),
            id
        );

        let fallback_payload = config.payload.clone();
        let mut view = ConfirmationModal::new(config);
        view.set_area(self.area);

        self.surface.attach(id)?;

        let (sender, receiver) = oneshot::channel();
        self.entries.insert(
            id,
            ModalEntry {
                view,
                resolver: Some(sender),
            },
        );
        self.open.push(id);
        self.update_scroll_lock();

        Ok(Confirmation {
            receiver,
            fallback_payload,
        })
    }

    /// Force-close every open dialog.
    ///
    /// Each pending confirmation resolves through its own cancel path, so
    /// no caller is left with a hanging result. Calling this with nothing
    /// open is a no-op.
    pub fn close_all(&mut self) {
        let ids = std::mem::take(&mut self.open);
        for id in ids {
            if let Some(mut entry) = self.entries.remove(&id) {
                let signals = entry.view.cancel();
                Self::dispatch(&mut *self.surface, id, &mut entry, signals);
            }
        }
        self.update_scroll_lock();
    }

    /// Number of currently open dialogs. Purely observational.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn has_modals(&self) -> bool {
        !self.open.is_empty()
    }

    /// Whether background scrolling is currently suppressed.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Route a key event to the topmost dialog.
    ///
    /// Returns whether the event was consumed. With nothing open every key
    /// (including Escape) passes through untouched.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(&id) = self.open.last() else {
            return false;
        };
        self.route(id, |view| view.handle_key(key));
        true
    }

    /// Route a mouse event to the topmost dialog. Returns whether the
    /// event was consumed.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let Some(&id) = self.open.last() else {
            return false;
        };
        self.route(id, |view| view.handle_mouse(mouse));
        true
    }

    /// Advance time-driven state (focus settling) on all open dialogs.
    pub fn tick(&mut self) {
        for entry in self.entries.values_mut() {
            entry.view.tick();
        }
    }

    /// Update the hosted surface area on all open dialogs.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        for entry in self.entries.values_mut() {
            entry.view.set_area(area);
        }
    }

    /// Render all open dialogs in stacking order, dimming the background.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.open.is_empty() {
            return;
        }
        self.area = area;

        let dim = Block::default()
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(dim, area);

        for id in &self.open {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.view.render(frame, area, theme);
            }
        }
    }

    fn route<F>(&mut self, id: ModalId, input: F)
    where
        F: FnOnce(&mut ConfirmationModal) -> Vec<Signal>,
    {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        let signals = input(&mut entry.view);
        if signals.is_empty() {
            return;
        }

        // The view guarantees outcome-then-closed, emitted once; resolve
        // first, then tear down within the same turn.
        let mut entry = match self.entries.remove(&id) {
            Some(entry) => entry,
            None => return,
        };
        Self::dispatch(&mut *self.surface, id, &mut entry, signals);
        self.open.retain(|open| *open != id);
        self.update_scroll_lock();
    }

    fn dispatch(
        surface: &mut dyn ModalSurface,
        id: ModalId,
        entry: &mut ModalEntry,
        signals: Vec<Signal>,
    ) {
        for signal in signals {
            match signal {
                Signal::Outcome(outcome) => {
                    if let Some(resolver) = entry.resolver.take() {
                        // The caller may have dropped its confirmation
                        let _ = resolver.send(outcome);
                    }
                }
                Signal::Closed => {
                    debug!("Destroying modal {}", id);
                    surface.detach(id);
                }
            }
        }
    }

    fn update_scroll_lock(&mut self) {
        let locked = !self.open.is_empty();
        if locked != self.scroll_locked {
            self.scroll_locked = locked;
            self.surface.set_scroll_lock(locked);
        }
    }
}

impl Drop for ModalManager {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::modal::{ModalError, Severity};
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct SurfaceLog {
        attached: Vec<ModalId>,
        detached: Vec<ModalId>,
        scroll_lock_changes: Vec<bool>,
        fail_attach: bool,
    }

    #[derive(Clone, Default)]
    struct MockSurface(Arc<Mutex<SurfaceLog>>);

    impl MockSurface {
        fn failing() -> Self {
            let surface = Self::default();
            surface.0.lock().unwrap().fail_attach = true;
            surface
        }

        fn log(&self) -> std::sync::MutexGuard<'_, SurfaceLog> {
            self.0.lock().unwrap()
        }
    }

    impl ModalSurface for MockSurface {
        fn attach(&mut self, id: ModalId) -> ModalResult<()> {
            let mut log = self.0.lock().unwrap();
            if log.fail_attach {
                return Err(ModalError::Attach {
                    id,
                    reason: "surface rejected mount".to_string(),
                });
            }
            log.attached.push(id);
            Ok(())
        }

        fn detach(&mut self, id: ModalId) {
            self.0.lock().unwrap().detached.push(id);
        }

        fn set_scroll_lock(&mut self, locked: bool) {
            self.0.lock().unwrap().scroll_lock_changes.push(locked);
        }
    }

    fn manager() -> (ModalManager, MockSurface) {
        let surface = MockSurface::default();
        let mut manager = ModalManager::new(Box::new(surface.clone()));
        manager.set_area(Rect::new(0, 0, 80, 24));
        (manager, surface)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn delete_config(id: i64) -> ModalConfig {
        ModalConfig::new("Delete Memo", "Are you sure?")
            .with_severity(Severity::Danger)
            .with_payload(json!({"id": id}))
    }

    #[tokio::test]
    async fn test_confirm_resolves_with_payload() {
        let (mut manager, _surface) = manager();
        let confirmation = manager.request(delete_config(1)).unwrap();
        assert_eq!(manager.open_count(), 1);

        // Navigate to confirm, then activate
        manager.handle_key(key(KeyCode::Tab));
        manager.handle_key(key(KeyCode::Enter));

        let outcome = confirmation.await;
        assert!(outcome.confirmed);
        assert_eq!(outcome.payload, json!({"id": 1}));
        assert_eq!(manager.open_count(), 0);
    }

    #[tokio::test]
    async fn test_escape_resolves_as_cancel() {
        let (mut manager, _surface) = manager();
        let confirmation = manager.request(delete_config(7)).unwrap();

        manager.handle_key(key(KeyCode::Esc));

        let outcome = confirmation.await;
        assert!(!outcome.confirmed);
        assert_eq!(outcome.payload, json!({"id": 7}));
    }

    #[test]
    fn test_escape_with_no_modal_open_is_passthrough() {
        let (mut manager, surface) = manager();
        assert!(!manager.handle_key(key(KeyCode::Esc)));
        assert_eq!(manager.open_count(), 0);
        assert!(surface.log().scroll_lock_changes.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let (mut manager, _surface) = manager();
        let mut first = manager.request(delete_config(1)).unwrap();
        let second = manager.request(delete_config(2)).unwrap();
        assert_eq!(manager.open_count(), 2);

        // Resolving the topmost (second) must not disturb the first
        manager.handle_key(key(KeyCode::Esc));

        let outcome = second.await;
        assert_eq!(outcome.payload, json!({"id": 2}));
        assert_eq!(manager.open_count(), 1);
        assert!(first.try_outcome().is_none());

        manager.handle_key(key(KeyCode::Esc));
        let outcome = first.await;
        assert_eq!(outcome.payload, json!({"id": 1}));
        assert_eq!(manager.open_count(), 0);
    }

    #[tokio::test]
    async fn test_close_all_resolves_every_pending_request() {
        let (mut manager, surface) = manager();
        let first = manager.request(delete_config(1)).unwrap();
        let second = manager.request(delete_config(2)).unwrap();

        manager.close_all();
        assert_eq!(manager.open_count(), 0);

        let first = first.await;
        let second = second.await;
        assert!(!first.confirmed);
        assert!(!second.confirmed);
        assert_eq!(first.payload, json!({"id": 1}));
        assert_eq!(second.payload, json!({"id": 2}));
        assert_eq!(surface.log().detached.len(), 2);

        // Idempotent when already empty
        manager.close_all();
        assert_eq!(manager.open_count(), 0);
    }

    #[test]
    fn test_attach_failure_rejects_request() {
        let surface = MockSurface::failing();
        let mut manager = ModalManager::new(Box::new(surface.clone()));

        let result = manager.request(delete_config(1));
        assert!(matches!(result, Err(ModalError::Attach { .. })));
        assert_eq!(manager.open_count(), 0);
        assert!(!manager.is_scroll_locked());
    }

    #[test]
    fn test_scroll_lock_toggles_only_at_boundaries() {
        let (mut manager, surface) = manager();
        let _first = manager.request(delete_config(1)).unwrap();
        let _second = manager.request(delete_config(2)).unwrap();
        assert!(manager.is_scroll_locked());

        manager.handle_key(key(KeyCode::Esc));
        assert!(manager.is_scroll_locked());

        manager.handle_key(key(KeyCode::Esc));
        assert!(!manager.is_scroll_locked());

        // Asserted once on 0->1, released once on 1->0, nothing in between
        assert_eq!(surface.log().scroll_lock_changes, vec![true, false]);
    }

    #[tokio::test]
    async fn test_attach_precedes_registration() {
        let (mut manager, surface) = manager();
        let _confirmation = manager.request(delete_config(1)).unwrap();

        let log = surface.log();
        assert_eq!(log.attached.len(), 1);
        assert_eq!(manager.open_count(), 1);
        assert_eq!(log.attached[0], *manager.open.last().unwrap());
    }

    #[tokio::test]
    async fn test_teardown_happens_exactly_once() {
        let (mut manager, surface) = manager();
        let confirmation = manager.request(delete_config(1)).unwrap();

        manager.handle_key(key(KeyCode::Esc));
        // Further input with nothing open is a no-op
        manager.handle_key(key(KeyCode::Esc));
        manager.close_all();

        let _ = confirmation.await;
        assert_eq!(surface.log().detached.len(), 1);
    }

    #[tokio::test]
    async fn test_dropping_manager_resolves_pending_as_cancel() {
        let (mut manager, _surface) = manager();
        let confirmation = manager.request(delete_config(3)).unwrap();
        drop(manager);

        let outcome = confirmation.await;
        assert!(!outcome.confirmed);
        assert_eq!(outcome.payload, json!({"id": 3}));
    }

    #[tokio::test]
    async fn test_backdrop_click_resolves_topmost_only() {
        let (mut manager, _surface) = manager();
        let mut first = manager.request(delete_config(1)).unwrap();
        let second = manager.request(delete_config(2)).unwrap();

        let backdrop = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        assert!(manager.handle_mouse(backdrop));

        let outcome = second.await;
        assert!(!outcome.confirmed);
        assert_eq!(outcome.payload, json!({"id": 2}));
        assert!(first.try_outcome().is_none());
        assert_eq!(manager.open_count(), 1);
    }
}
