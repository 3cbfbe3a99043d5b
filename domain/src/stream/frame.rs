//! Decoding of raw server-sent-event frames into task events.

use crate::task::event::{Event, EventKind, Payload, SYNTHETIC_KEY};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One dispatched server-sent-event frame, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawFrame {
    /// The `event:` field, if the server sent one.
    pub event: Option<String>,
    /// Concatenated `data:` lines.
    pub data: String,
}

impl RawFrame {
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            event: None,
            data: data.into(),
        }
    }
}

/// Result of decoding a frame
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedFrame {
    /// A task event (possibly a synthetic protocol ERROR).
    Event(Event),
    /// Heartbeat or empty frame: proof of life, nothing to record.
    KeepAlive,
}

/// Decode a raw frame.
///
/// Never fails: a payload that is not a JSON object becomes a synthetic
/// ERROR event with reason `protocol`, so a corrupt frame always yields a
/// terminal signal instead of silently ending the stream.
pub fn decode_frame(frame: &RawFrame, received_at: DateTime<Utc>) -> DecodedFrame {
    let data = frame.data.trim();
    if data.is_empty() {
        return DecodedFrame::KeepAlive;
    }

    let mut payload: Payload = match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return DecodedFrame::Event(protocol_error(
                format!("expected a JSON object, got {}", json_type(&other)),
                data,
            ));
        }
        Err(e) => {
            return DecodedFrame::Event(protocol_error(format!("malformed frame: {e}"), data));
        }
    };
    // Only locally generated events may claim to be synthetic
    payload.remove(SYNTHETIC_KEY);

    let event_type = payload
        .get("type")
        .and_then(Value::as_str)
        .or(frame.event.as_deref())
        .unwrap_or("")
        .to_ascii_uppercase();

    let kind = match event_type.as_str() {
        "HEARTBEAT" | "PING" => return DecodedFrame::KeepAlive,
        "STARTED" | "START" => EventKind::Started,
        "COMPLETE" | "COMPLETED" => EventKind::Complete,
        "ERROR" | "FAILED" => EventKind::Error,
        // PROGRESS, STREAMING_URL and anything unknown
        _ => EventKind::Progress,
    };

    let timestamp = payload
        .get("timestamp")
        .and_then(parse_timestamp)
        .unwrap_or(received_at);

    DecodedFrame::Event(Event::new(kind, timestamp, payload))
}

fn protocol_error(message: String, raw: &str) -> Event {
    let mut event = Event::synthetic_error("protocol", message);
    event
        .payload
        .insert("raw".to_string(), Value::String(crate::util::truncate(raw, 512)));
    event
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::event::REASON_KEY;

    fn decode(data: &str) -> DecodedFrame {
        decode_frame(&RawFrame::data(data), Utc::now())
    }

    fn expect_event(decoded: DecodedFrame) -> Event {
        match decoded {
            DecodedFrame::Event(event) => event,
            DecodedFrame::KeepAlive => panic!("expected an event"),
        }
    }

    #[test]
    fn test_known_types() {
        assert_eq!(
            expect_event(decode(r#"{"type":"STARTED","runId":"r1"}"#)).kind,
            EventKind::Started
        );
        assert_eq!(
            expect_event(decode(r#"{"type":"PROGRESS"}"#)).kind,
            EventKind::Progress
        );
        assert_eq!(
            expect_event(decode(r#"{"type":"COMPLETE","status":"COMPLETED"}"#)).kind,
            EventKind::Complete
        );
        assert_eq!(
            expect_event(decode(r#"{"type":"ERROR","message":"x"}"#)).kind,
            EventKind::Error
        );
    }

    #[test]
    fn test_streaming_url_and_unknown_are_progress() {
        let event = expect_event(decode(
            r#"{"type":"STREAMING_URL","streamingUrl":"https://tetra.example/view/1"}"#,
        ));
        assert_eq!(event.kind, EventKind::Progress);
        assert_eq!(
            expect_event(decode(r#"{"type":"SCREENSHOT"}"#)).kind,
            EventKind::Progress
        );
    }

    #[test]
    fn test_event_field_used_when_type_missing() {
        let frame = RawFrame {
            event: Some("complete".to_string()),
            data: r#"{"resultJson":{}}"#.to_string(),
        };
        let event = expect_event(decode_frame(&frame, Utc::now()));
        assert_eq!(event.kind, EventKind::Complete);
    }

    #[test]
    fn test_heartbeat_and_empty_are_keep_alive() {
        assert_eq!(decode(r#"{"type":"HEARTBEAT"}"#), DecodedFrame::KeepAlive);
        assert_eq!(decode("   "), DecodedFrame::KeepAlive);
    }

    #[test]
    fn test_malformed_frame_is_protocol_error() {
        let event = expect_event(decode("{not json"));
        assert_eq!(event.kind, EventKind::Error);
        assert!(event.is_synthetic());
        assert_eq!(event.field(REASON_KEY), Some("protocol"));
        assert_eq!(event.field("raw"), Some("{not json"));
    }

    #[test]
    fn test_non_object_is_protocol_error() {
        let event = expect_event(decode("[1,2,3]"));
        assert_eq!(event.field(REASON_KEY), Some("protocol"));
        assert!(event.field("message").unwrap().contains("an array"));
    }

    #[test]
    fn test_remote_cannot_claim_synthetic() {
        let event = expect_event(decode(
            r#"{"type":"ERROR","synthetic":true,"reason":"timeout"}"#,
        ));
        assert!(!event.is_synthetic());
    }

    #[test]
    fn test_timestamps_from_payload() {
        let event = expect_event(decode(
            r#"{"type":"PROGRESS","timestamp":"2024-05-01T10:00:00Z"}"#,
        ));
        assert_eq!(event.timestamp.to_rfc3339(), "2024-05-01T10:00:00+00:00");

        let event = expect_event(decode(r#"{"type":"PROGRESS","timestamp":0}"#));
        assert_eq!(event.timestamp.timestamp(), 0);

        let now = Utc::now();
        let event = expect_event(decode_frame(
            &RawFrame::data(r#"{"type":"PROGRESS","timestamp":"yesterday"}"#),
            now,
        ));
        assert_eq!(event.timestamp, now);
    }
}
