//! Why a task ended in ERROR.

use super::event::{Event, MESSAGE_KEY, REASON_KEY};
use serde::{Deserialize, Serialize};

/// Category of a task failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// The stream could not be opened or dropped before a terminal event.
    Connection,
    /// A frame could not be decoded.
    Protocol,
    /// No event arrived within the inactivity window.
    Timeout,
    /// The exploration's overall time budget elapsed.
    BudgetExceeded,
    /// The automation service reported an ERROR event.
    Remote,
    /// The automation finished with a non-success status.
    Automation,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Connection => "connection",
            FailureKind::Protocol => "protocol",
            FailureKind::Timeout => "timeout",
            FailureKind::BudgetExceeded => "budget-exceeded",
            FailureKind::Remote => "remote",
            FailureKind::Automation => "automation",
        }
    }

    fn from_reason(reason: &str) -> Option<Self> {
        match reason {
            "connection" => Some(FailureKind::Connection),
            "protocol" => Some(FailureKind::Protocol),
            "timeout" => Some(FailureKind::Timeout),
            "budget-exceeded" => Some(FailureKind::BudgetExceeded),
            "automation" => Some(FailureKind::Automation),
            _ => None,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded failure of a task (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TaskFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Derive the failure from an ERROR event.
    ///
    /// Synthetic events carry a `reason`; anything else came from the
    /// service and is a [`FailureKind::Remote`] failure.
    pub fn from_error_event(event: &Event) -> Self {
        let kind = if event.is_synthetic() {
            event
                .field(REASON_KEY)
                .and_then(FailureKind::from_reason)
                .unwrap_or(FailureKind::Remote)
        } else {
            FailureKind::Remote
        };
        let message = event
            .field(MESSAGE_KEY)
            .or_else(|| event.field("error"))
            .unwrap_or("automation reported an error")
            .to_string();
        Self { kind, message }
    }
}

impl std::fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::event::{EventKind, Payload};
    use chrono::Utc;
    use serde_json::Value;

    #[test]
    fn test_synthetic_reason_maps_to_kind() {
        let event = Event::synthetic_error("budget-exceeded", "time budget of 5 minutes elapsed");
        let failure = TaskFailure::from_error_event(&event);
        assert_eq!(failure.kind, FailureKind::BudgetExceeded);
        assert_eq!(failure.to_string(), "budget-exceeded: time budget of 5 minutes elapsed");
    }

    #[test]
    fn test_remote_error_uses_service_message() {
        let mut payload = Payload::new();
        payload.insert("message".into(), Value::String("site blocked".into()));
        // A remote payload cannot impersonate a local reason
        payload.insert("reason".into(), Value::String("timeout".into()));
        let event = Event::new(EventKind::Error, Utc::now(), payload);

        let failure = TaskFailure::from_error_event(&event);
        assert_eq!(failure.kind, FailureKind::Remote);
        assert_eq!(failure.message, "site blocked");
    }

    #[test]
    fn test_remote_error_without_message() {
        let event = Event::new(EventKind::Error, Utc::now(), Payload::new());
        let failure = TaskFailure::from_error_event(&event);
        assert_eq!(failure.message, "automation reported an error");
    }
}
