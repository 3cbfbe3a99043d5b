//! Live-view URL detection in event payloads.

use super::event::Payload;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Payload keys that may carry the live-view URL, most specific first.
///
/// A bare `url` is not one of them: STARTED payloads echo the target site
/// under that key.
const LIVE_VIEW_KEYS: &[&str] = &["streamingUrl", "liveViewUrl", "browserUrl", "viewUrl"];

static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("static regex is valid")
});

/// Find a live-view URL in a payload.
///
/// Looks at the known keys at the top level and one level down (some
/// services nest them under `data`). Only absolute http(s) URLs qualify.
pub fn extract_live_view_url(payload: &Payload) -> Option<String> {
    find_in(payload).or_else(|| {
        payload
            .values()
            .filter_map(Value::as_object)
            .find_map(find_in)
    })
}

fn find_in(map: &Payload) -> Option<String> {
    LIVE_VIEW_KEYS.iter().find_map(|key| {
        map.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|candidate| HTTP_URL.is_match(candidate))
            .map(str::to_string)
    })
}
