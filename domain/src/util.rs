//! Shared utility functions.

/// Shorten `s` to at most `max_bytes` bytes, cutting on a UTF-8 boundary and
/// appending `...` when something was removed.
pub fn truncate(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes.saturating_sub(3);
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
