//! Event stream reader
//!
//! Decodes the raw frames of one browse connection into typed [`Event`]s.
//! The sequence ends when the connection closes or a COMPLETE/ERROR event
//! is observed, whichever comes first.

use crate::ports::browser_automation::FrameStream;
use chrono::Utc;
use scout_domain::{DecodedFrame, Event, FailureKind, decode_frame};
use tracing::{debug, trace};

/// One item read from the stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    Event(Event),
    /// A heartbeat or empty frame: the remote side is alive.
    KeepAlive,
}

/// Reads typed events from one browse connection.
///
/// Corrupt frames and transport failures surface as synthetic ERROR events,
/// so the consumer always sees a terminal signal before the sequence ends
/// (unless the connection simply closes).
pub struct EventStreamReader {
    stream: FrameStream,
    finished: bool,
}

impl EventStreamReader {
    pub fn new(stream: FrameStream) -> Self {
        Self {
            stream,
            finished: false,
        }
    }

    /// Next item, suspending until a frame arrives.
    ///
    /// Returns `None` once the connection is closed or a terminal event has
    /// been returned.
    pub async fn next(&mut self) -> Option<StreamItem> {
        if self.finished {
            return None;
        }

        let Some(frame) = self.stream.recv().await else {
            debug!("Event stream closed");
            self.finished = true;
            return None;
        };

        let event = match frame {
            Ok(frame) => {
                trace!(event = ?frame.event, data = %frame.data, "SSE frame");
                match decode_frame(&frame, Utc::now()) {
                    DecodedFrame::KeepAlive => return Some(StreamItem::KeepAlive),
                    DecodedFrame::Event(event) => event,
                }
            }
            Err(e) => Event::synthetic_error(FailureKind::Connection.as_str(), e.to_string()),
        };

        if event.is_terminal() {
            self.close();
        }
        Some(StreamItem::Event(event))
    }

    /// Close the underlying connection; pending and later reads end.
    pub fn close(&mut self) {
        self.finished = true;
        self.stream.close();
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::browser_automation::BrowserError;
    use scout_domain::{EventKind, RawFrame, TaskFailure};
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    fn reader(frames: Vec<Result<RawFrame, BrowserError>>) -> EventStreamReader {
        let (tx, rx) = mpsc::channel(frames.len().max(1));
        for frame in frames {
            tx.try_send(frame).unwrap();
        }
        EventStreamReader::new(FrameStream::new(rx, CancellationToken::new()))
    }

    async fn drain(mut reader: EventStreamReader) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(item) = reader.next().await {
            if let StreamItem::Event(event) = item {
                events.push(event);
            }
        }
        events
    }

    #[tokio::test]
    async fn test_stops_after_terminal_event() {
        let events = drain(reader(vec![
            Ok(RawFrame::data(r#"{"type":"STARTED","runId":"r1"}"#)),
            Ok(RawFrame::data(r#"{"type":"HEARTBEAT"}"#)),
            Ok(RawFrame::data(r#"{"type":"PROGRESS","message":"reading"}"#)),
            Ok(RawFrame::data(r#"{"type":"COMPLETE","status":"COMPLETED","resultJson":{}}"#)),
            Ok(RawFrame::data(r#"{"type":"PROGRESS","message":"after the end"}"#)),
        ]))
        .await;

        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Started, EventKind::Progress, EventKind::Complete]
        );
    }

    #[tokio::test]
    async fn test_malformed_frame_becomes_protocol_error() {
        let mut reader = reader(vec![Ok(RawFrame::data("{not json"))]);
        let Some(StreamItem::Event(event)) = reader.next().await else {
            panic!("expected an event");
        };
        assert_eq!(event.kind, EventKind::Error);
        assert_eq!(TaskFailure::from_error_event(&event).kind, FailureKind::Protocol);
        assert!(reader.next().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_becomes_connection_error() {
        let mut reader = reader(vec![Err(BrowserError::StreamError("reset".into()))]);
        let Some(StreamItem::Event(event)) = reader.next().await else {
            panic!("expected an event");
        };
        assert_eq!(TaskFailure::from_error_event(&event).kind, FailureKind::Connection);
    }

    #[tokio::test]
    async fn test_keep_alive_reported() {
        let mut reader = reader(vec![Ok(RawFrame::data(""))]);
        assert_eq!(reader.next().await, Some(StreamItem::KeepAlive));
        assert!(reader.next().await.is_none());
    }

    #[tokio::test]
    async fn test_close_ends_sequence() {
        let (_tx, rx) = mpsc::channel(1);
        let mut reader = EventStreamReader::new(FrameStream::new(rx, CancellationToken::new()));
        reader.close();
        assert!(reader.next().await.is_none());
    }
}
