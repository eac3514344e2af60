use crate::models::{Ack, BulkCounts};
use serde::Serialize;
use std::time::Duration;

/// How long a success message stays visible.
pub const SUCCESS_MESSAGE_TTL: Duration = Duration::from_millis(5000);

/// Shown when a failed add carries no server message.
pub const ADD_FAILED_FALLBACK: &str = "Failed to add phone number(s)";

/// Which request, if any, carries the valid entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPath {
    /// Nothing valid; no request is made
    Empty,
    /// Exactly one valid entry
    Single,
    /// Two or more valid entries
    Bulk,
}

/// What the backend acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Single(Ack),
    Bulk(BulkCounts),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

/// The single status line shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub message: String,
}

/// What the caller does to its form after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormEffect {
    /// Replace the entries with one blank row
    pub reset_entries: bool,

    /// Hide the message after this long; `None` keeps it until the next attempt
    pub auto_clear_after: Option<Duration>,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    pub fn form_effect(&self) -> FormEffect {
        match self.kind {
            StatusKind::Success | StatusKind::Warning => FormEffect {
                reset_entries: true,
                auto_clear_after: Some(SUCCESS_MESSAGE_TTL),
            },
            StatusKind::Error => FormEffect {
                reset_entries: false,
                auto_clear_after: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_warning_reset_and_expire() {
        for status in [StatusMessage::success("ok"), StatusMessage::warning("hm")] {
            let effect = status.form_effect();
            assert!(effect.reset_entries);
            assert_eq!(effect.auto_clear_after, Some(Duration::from_millis(5000)));
        }
    }

    #[test]
    fn test_error_keeps_entries_and_message() {
        let effect = StatusMessage::error("nope").form_effect();
        assert!(!effect.reset_entries);
        assert!(effect.auto_clear_after.is_none());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(StatusMessage::error("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "error", "message": "x" }));
    }
}
