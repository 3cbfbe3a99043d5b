//! HTTP adapter for the browser-automation service.

use super::sse::SseDecoder;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode, header};
use scout_application::{BrowseRequest, BrowserAutomation, BrowserError, FrameStream};
use scout_domain::RawFrame;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const RUN_SSE_PATH: &str = "/v1/automation/run-sse";
const FRAME_BUFFER: usize = 64;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Launches browse tasks with `POST /v1/automation/run-sse` and streams
/// the response as [`RawFrame`]s.
///
/// Only the connect phase has a timeout: a live stream is bounded by the
/// caller's inactivity window, not by the HTTP client.
pub struct HttpBrowserAutomation {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpBrowserAutomation {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| BrowserError::ConnectionError(e.to_string()))?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), RUN_SSE_PATH),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(request: &BrowseRequest) -> Value {
        let mut body = json!({
            "url": request.site.as_str(),
            "goal": request.instructions,
            "browser_profile": request.profile.as_str(),
        });
        if let Some(country) = &request.proxy_country {
            body["proxy_config"] = json!({
                "enabled": true,
                "country_code": country,
            });
        }
        body
    }
}

#[async_trait]
impl BrowserAutomation for HttpBrowserAutomation {
    async fn launch(&self, request: &BrowseRequest) -> Result<FrameStream, BrowserError> {
        info!(site = %request.site.as_str(), profile = request.profile.as_str(), "Launching browse task");

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-Key", &self.api_key)
            .header(header::ACCEPT, "text/event-stream")
            .json(&Self::request_body(request))
            .send()
            .await
            .map_err(|e| BrowserError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BrowserError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrowserError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let (tx, rx) = mpsc::channel(FRAME_BUFFER);
        let cancel = CancellationToken::new();
        tokio::spawn(read_frames(response, tx, cancel.clone()));
        Ok(FrameStream::new(rx, cancel))
    }
}

/// Reader task: decodes the body into frames until the stream ends, the
/// receiver goes away or the token is cancelled. Returning drops the
/// response, which closes the connection.
async fn read_frames(
    response: reqwest::Response,
    tx: mpsc::Sender<Result<RawFrame, BrowserError>>,
    cancel: CancellationToken,
) {
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();

    loop {
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Browse stream cancelled, closing connection");
                return;
            }
            chunk = body.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                for frame in decoder.push(&bytes) {
                    debug!(event = ?frame.event, data = %frame.data, "Received frame");
                    if tx.send(Ok(frame)).await.is_err() {
                        return;
                    }
                }
            }
            Some(Err(e)) => {
                warn!("Browse stream failed: {}", e);
                let _ = tx.send(Err(BrowserError::StreamError(e.to_string()))).await;
                return;
            }
            None => {
                if let Some(frame) = decoder.finish() {
                    debug!(event = ?frame.event, data = %frame.data, "Received frame");
                    let _ = tx.send(Ok(frame)).await;
                }
                debug!("Browse stream ended");
                return;
            }
        }
    }
}
