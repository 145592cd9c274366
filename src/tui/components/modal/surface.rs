//! Surface boundary for modal attachment
//!
//! The manager never talks to the UI runtime directly. It goes through a
//! `ModalSurface`, the pair of attach/detach operations any hosting
//! environment must provide, plus the process-wide scroll lock marker.

use super::types::{ModalId, ModalResult};
use tracing::debug;

/// Operations the hosting UI environment provides to the modal manager.
pub trait ModalSurface: Send {
    /// Mount a modal instance on the surface.
    ///
    /// Must succeed before the instance is registered in the open set, so
    /// a registered modal can always receive input.
    fn attach(&mut self, id: ModalId) -> ModalResult<()>;

    /// Unmount a modal instance. Called exactly once per attached instance.
    fn detach(&mut self, id: ModalId);

    /// Assert or release the background scroll lock.
    ///
    /// Only called on 0<->1 transitions of the open set.
    fn set_scroll_lock(&mut self, locked: bool);
}

/// Surface implementation backed by the terminal overlay layer.
///
/// The TUI renders modals itself, so attachment here is pure bookkeeping;
/// it exists to keep the attach-before-register ordering observable and to
/// carry the scroll lock state the app reads while rendering.
#[derive(Debug, Default)]
pub struct OverlaySurface {
    attached: Vec<ModalId>,
    scroll_locked: bool,
}

impl OverlaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances currently mounted on the overlay.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Whether background scrolling is currently suppressed.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

impl ModalSurface for OverlaySurface {
    fn attach(&mut self, id: ModalId) -> ModalResult<()> {
        debug!("Attaching modal {} to overlay", id);
        self.attached.push(id);
        Ok(())
    }

    fn detach(&mut self, id: ModalId) {
        debug!("Detaching modal {} from overlay", id);
        self.attached.retain(|attached| *attached != id);
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        debug!("Background scroll lock: {}", locked);
        self.scroll_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_attach_detach() {
        let mut surface = OverlaySurface::new();
        let id = ModalId::new();

        surface.attach(id).unwrap();
        assert_eq!(surface.attached_count(), 1);

        surface.detach(id);
        assert_eq!(surface.attached_count(), 0);
    }

    #[test]
    fn test_overlay_scroll_lock() {
        let mut surface = OverlaySurface::new();
        assert!(!surface.is_scroll_locked());

        surface.set_scroll_lock(true);
        assert!(surface.is_scroll_locked());

        surface.set_scroll_lock(false);
        assert!(!surface.is_scroll_locked());
    }
}
