//! Task events received from the browser-automation stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque key/value payload of an event.
pub type Payload = Map<String, Value>;

/// Kind of a task event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Started,
    Progress,
    Complete,
    Error,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Started => "STARTED",
            EventKind::Progress => "PROGRESS",
            EventKind::Complete => "COMPLETE",
            EventKind::Error => "ERROR",
        }
    }

    /// COMPLETE and ERROR end a task.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::Complete | EventKind::Error)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event of a task (Value Object)
///
/// Events are append-only: once recorded on a [`Task`](super::entities::Task)
/// they are never modified. Timestamps come from the remote payload when it
/// carries one, so they are not guaranteed to be monotonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub payload: Payload,
}

/// Payload key marking events produced locally rather than by the stream.
pub const SYNTHETIC_KEY: &str = "synthetic";
/// Payload key carrying the failure reason of a synthetic ERROR.
pub const REASON_KEY: &str = "reason";
/// Payload key carrying a human readable message.
pub const MESSAGE_KEY: &str = "message";

impl Event {
    pub fn new(kind: EventKind, timestamp: DateTime<Utc>, payload: Payload) -> Self {
        Self {
            kind,
            timestamp,
            payload,
        }
    }

    /// A locally generated ERROR event (timeout, protocol, budget, connection).
    pub fn synthetic_error(reason: &str, message: impl Into<String>) -> Self {
        let mut payload = Payload::new();
        payload.insert(SYNTHETIC_KEY.to_string(), Value::Bool(true));
        payload.insert(REASON_KEY.to_string(), Value::String(reason.to_string()));
        payload.insert(MESSAGE_KEY.to_string(), Value::String(message.into()));
        Self::new(EventKind::Error, Utc::now(), payload)
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    pub fn is_synthetic(&self) -> bool {
        self.payload
            .get(SYNTHETIC_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// String field of the payload, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// Short human readable description for progress displays.
    pub fn summary(&self) -> String {
        let text = ["message", "action", "step", "status", "streamingUrl"]
            .iter()
            .find_map(|key| self.field(key));
        match text {
            Some(text) => format!("[{}] {}", self.kind, text),
            None => format!("[{}]", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_kinds() {
        assert!(EventKind::Complete.is_terminal());
        assert!(EventKind::Error.is_terminal());
        assert!(!EventKind::Started.is_terminal());
        assert!(!EventKind::Progress.is_terminal());
    }

    #[test]
    fn test_synthetic_error_carries_reason() {
        let event = Event::synthetic_error("timeout", "no event for 120s");
        assert_eq!(event.kind, EventKind::Error);
        assert!(event.is_synthetic());
        assert_eq!(event.field(REASON_KEY), Some("timeout"));
        assert_eq!(event.field(MESSAGE_KEY), Some("no event for 120s"));
    }

    #[test]
    fn test_summary_prefers_message() {
        let mut payload = Payload::new();
        payload.insert("message".into(), Value::String("Clicking link".into()));
        let event = Event::new(EventKind::Progress, Utc::now(), payload);
        assert_eq!(event.summary(), "[PROGRESS] Clicking link");
    }
}
