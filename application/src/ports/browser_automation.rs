//! Browser automation port
//!
//! Defines the interface for launching a remote browsing task and reading
//! its server-sent-event stream.

use async_trait::async_trait;
use scout_domain::{RawFrame, Site};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while talking to the browser-automation service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowserError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unauthorized: check the browser automation API key")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Stream error: {0}")]
    StreamError(String),
}

/// Browser fingerprint profile requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrowserProfile {
    #[default]
    Lite,
    Stealth,
}

impl BrowserProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserProfile::Lite => "lite",
            BrowserProfile::Stealth => "stealth",
        }
    }
}

impl std::str::FromStr for BrowserProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lite" => Ok(BrowserProfile::Lite),
            "stealth" => Ok(BrowserProfile::Stealth),
            other => Err(format!("unknown browser profile `{other}` (expected lite or stealth)")),
        }
    }
}

/// One browse request: where to start and what to do there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseRequest {
    pub site: Site,
    pub instructions: String,
    pub profile: BrowserProfile,
    /// Route the browser through a proxy in this country (ISO code).
    pub proxy_country: Option<String>,
}

impl BrowseRequest {
    pub fn new(site: Site, instructions: impl Into<String>) -> Self {
        Self {
            site,
            instructions: instructions.into(),
            profile: BrowserProfile::default(),
            proxy_country: None,
        }
    }

    pub fn with_profile(mut self, profile: BrowserProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_proxy_country(mut self, country: Option<String>) -> Self {
        self.proxy_country = country;
        self
    }
}

/// Handle for receiving raw frames of one live browse connection.
///
/// Wraps an `mpsc::Receiver` fed by the adapter's reader task. The
/// [`CancellationToken`] is shared with that task: closing the handle (or
/// dropping it) cancels the token, which drops the underlying connection.
pub struct FrameStream {
    receiver: mpsc::Receiver<Result<RawFrame, BrowserError>>,
    cancel: CancellationToken,
}

impl FrameStream {
    pub fn new(
        receiver: mpsc::Receiver<Result<RawFrame, BrowserError>>,
        cancel: CancellationToken,
    ) -> Self {
        Self { receiver, cancel }
    }

    /// Next frame, or `None` once the connection ended or was closed.
    ///
    /// Returns promptly when [`close`](Self::close) is called from elsewhere
    /// through the cancellation token.
    pub async fn recv(&mut self) -> Option<Result<RawFrame, BrowserError>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            frame = self.receiver.recv() => frame,
        }
    }

    /// Close the connection; later `recv` calls return `None`.
    pub fn close(&mut self) {
        self.cancel.cancel();
        self.receiver.close();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Gateway to the browser-automation service
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait BrowserAutomation: Send + Sync {
    /// Issue the browse request and return its live frame stream.
    async fn launch(&self, request: &BrowseRequest) -> Result<FrameStream, BrowserError>;
}
