//! Core types for the modal confirmation subsystem
//!
//! This module defines the request/outcome data model shared by the
//! confirmation view and the modal manager.

use serde_json::Value;
use uuid::Uuid;

/// Opaque handle identifying one live modal instance.
///
/// A handle is owned exclusively by the manager from creation until
/// destruction and is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(Uuid);

impl ModalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ModalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ModalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity classification for a confirmation request.
///
/// Drives the icon and styling class only; it has no behavioral effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Danger,
}

impl Severity {
    /// Icon name for this severity.
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Danger => "alert-triangle",
            Severity::Warning => "alert-circle",
            Severity::Info => "info-circle",
        }
    }

    /// Styling tag for this severity (`modal-<severity>`).
    pub fn class(&self) -> String {
        format!("modal-{}", self)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for one confirmation request.
///
/// Immutable once handed to the manager. The `payload` is opaque to the
/// whole subsystem and is round-tripped unchanged into the outcome.
#[derive(Debug, Clone)]
pub struct ModalConfig {
    /// Dialog title
    pub title: String,

    /// Dialog message body
    pub message: String,

    /// Label of the confirm control (defaults to "Confirm")
    pub confirm_label: Option<String>,

    /// Label of the cancel control (defaults to "Cancel")
    pub cancel_label: Option<String>,

    /// Severity classification
    pub severity: Severity,

    /// Caller-supplied opaque data threaded through unchanged
    pub payload: Value,
}

impl ModalConfig {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: None,
            cancel_label: None,
            severity: Severity::default(),
            payload: Value::Null,
        }
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Terminal value produced by exactly one modal instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalOutcome {
    /// True only when the confirm trigger fired
    pub confirmed: bool,

    /// Exactly the payload supplied in the originating config
    pub payload: Value,
}

impl ModalOutcome {
    pub fn confirmed(payload: Value) -> Self {
        Self {
            confirmed: true,
            payload,
        }
    }

    pub fn cancelled(payload: Value) -> Self {
        Self {
            confirmed: false,
            payload,
        }
    }
}

/// Result type for modal operations
pub type ModalResult<T> = std::result::Result<T, ModalError>;

/// Modal-specific error types
#[derive(Debug, thiserror::Error)]
pub enum ModalError {
    #[error("Failed to attach modal '{id}' to the surface: {reason}")]
    Attach { id: ModalId, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_icon_mapping() {
        assert_eq!(Severity::Danger.icon(), "alert-triangle");
        assert_eq!(Severity::Warning.icon(), "alert-circle");
        assert_eq!(Severity::Info.icon(), "info-circle");
    }

    #[test]
    fn test_severity_class_mapping() {
        assert_eq!(Severity::Danger.class(), "modal-danger");
        assert_eq!(Severity::Warning.class(), "modal-warning");
        assert_eq!(Severity::Info.class(), "modal-info");
    }

    #[test]
    fn test_config_defaults() {
        let config = ModalConfig::new("Delete Memo", "Are you sure?");

        assert_eq!(config.severity, Severity::Info);
        assert!(config.confirm_label.is_none());
        assert!(config.cancel_label.is_none());
        assert_eq!(config.payload, Value::Null);
    }

    #[test]
    fn test_config_builder() {
        let config = ModalConfig::new("Delete Memo", "Are you sure?")
            .with_confirm_label("Delete")
            .with_cancel_label("Keep")
            .with_severity(Severity::Danger)
            .with_payload(json!({"memoId": 1}));

        assert_eq!(config.confirm_label.as_deref(), Some("Delete"));
        assert_eq!(config.cancel_label.as_deref(), Some("Keep"));
        assert_eq!(config.severity, Severity::Danger);
        assert_eq!(config.payload, json!({"memoId": 1}));
    }

    #[test]
    fn test_modal_ids_are_unique() {
        let a = ModalId::new();
        let b = ModalId::new();
        assert_ne!(a, b);
    }
}
