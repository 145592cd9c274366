//! Modal confirmation subsystem
//!
//! A confirmation request flows caller -> manager -> view and back: the
//! manager creates and attaches a `ConfirmationModal`, hands the caller a
//! `Confirmation` that resolves with the dialog's outcome, and guarantees
//! teardown on every exit path.

pub mod manager;
pub mod surface;
pub mod types;
pub mod view;

pub use manager::{Confirmation, ModalManager};
pub use surface::{ModalSurface, OverlaySurface};
pub use types::{ModalConfig, ModalError, ModalId, ModalOutcome, ModalResult, Severity};
pub use view::{ConfirmationModal, Signal};
