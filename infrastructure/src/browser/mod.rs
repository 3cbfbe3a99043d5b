//! Browser-automation adapter (server-sent events over HTTP)

mod client;
mod sse;

pub use client::HttpBrowserAutomation;
pub use sse::SseDecoder;
