//! Incremental server-sent-event decoder.

use scout_domain::RawFrame;
use tracing::trace;

/// Splits a byte stream into [`RawFrame`]s.
///
/// Bytes are buffered until a full line is available; a blank line
/// dispatches the accumulated frame. A block made only of `:` comments is
/// dispatched as an empty frame so it still counts as a keep-alive.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    pending: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every frame it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<RawFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line).into_owned();
            if let Some(frame) = self.process_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flush a trailing frame the server did not terminate with a blank line.
    pub fn finish(&mut self) -> Option<RawFrame> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest);
            let line = line.trim_end_matches('\r').to_string();
            self.process_line(&line);
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<RawFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        self.pending = true;
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id, retry and unknown fields carry nothing we use
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<RawFrame> {
        if !std::mem::take(&mut self.pending) {
            return None;
        }
        let frame = RawFrame {
            event: self.event.take(),
            data: self.data.join("\n"),
        };
        self.data.clear();
        trace!(event = ?frame.event, data = %frame.data, "SSE frame");
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: {\"type\":\"STARTED\"}\n\n");
        assert_eq!(frames, vec![RawFrame::data("{\"type\":\"STARTED\"}")]);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"event: progress\nda").is_empty());
        assert!(decoder.push(b"ta: {\"purpose\":").is_empty());
        let frames = decoder.push(b"\"searching\"}\n\n");
        assert_eq!(
            frames,
            vec![RawFrame {
                event: Some("progress".to_string()),
                data: "{\"purpose\":\"searching\"}".to_string(),
            }]
        );
    }

    #[test]
    fn test_crlf_and_multiline_data() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: first\r\ndata: second\r\n\r\ndata:third\r\n\r\n");
        assert_eq!(
            frames,
            vec![RawFrame::data("first\nsecond"), RawFrame::data("third")]
        );
    }

    #[test]
    fn test_comment_block_is_empty_frame() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b": keep-alive\n\n");
        assert_eq!(frames, vec![RawFrame::default()]);
    }

    #[test]
    fn test_consecutive_blank_lines_dispatch_once() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: x\n\n\n\n");
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_finish_flushes_unterminated_frame() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"type\":\"COMPLETE\"}").is_empty());
        assert_eq!(
            decoder.finish(),
            Some(RawFrame::data("{\"type\":\"COMPLETE\"}"))
        );
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_ignores_id_and_retry() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"id: 7\nretry: 1000\ndata: ok\n\n");
        assert_eq!(frames, vec![RawFrame::data("ok")]);
    }
}
