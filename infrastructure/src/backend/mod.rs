//! REST backend adapter
//!
//! In backend mode planning, synthesis and chat are delegated to a server
//! exposing `/v1/plan`, `/v1/synthesize` and `/v1/chat`. The server keeps
//! the chat session, so the adapter remembers the `session_id` returned by
//! synthesis and sends only the new message with each question.

use crate::http::{check_status, transport_error};
use async_trait::async_trait;
use reqwest::Client;
use scout_application::{
    ChatRequest, ChatService, PlanRequest, PlanningService, ServiceError, SynthesisRequest,
    SynthesisService,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

const USER_ID: &str = "parallel-scout";

/// Planning, synthesis and chat served by the REST backend.
pub struct BackendServices {
    client: Client,
    base_url: String,
    session_id: Mutex<Option<String>>,
}

impl BackendServices {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ServiceError::ConnectionError(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_id: Mutex::new(None),
        }
    }

    /// Chat session created by the last successful synthesis.
    pub fn session_id(&self) -> Option<String> {
        self.session_id.lock().ok().and_then(|s| s.clone())
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Calling backend");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PlanningService for BackendServices {
    async fn plan(&self, request: &PlanRequest) -> Result<String, ServiceError> {
        info!(topics = request.topics.len(), "Requesting plan from backend");
        let body = json!({
            "user_id": USER_ID,
            "topics": request.topics,
            "depth": request.depth.as_str(),
            "time_budget_min": request.time_budget_minutes,
        });
        let plan = self.post("/v1/plan", &body).await?;
        Ok(plan.to_string())
    }
}

#[async_trait]
impl SynthesisService for BackendServices {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, ServiceError> {
        info!(findings = request.findings.len(), "Requesting brief from backend");
        let browsing_results: Vec<Value> = request
            .findings
            .iter()
            .map(|f| {
                json!({
                    "website": f.site,
                    "instructions": f.instructions,
                    "content": f.content,
                    "status": "success",
                })
            })
            .collect();
        let body = json!({
            "user_id": USER_ID,
            "goal": request.goal.as_deref().unwrap_or_default(),
            "topics": request.topics,
            "browsing_results": browsing_results,
        });

        let response = self.post("/v1/synthesize", &body).await?;
        let brief = response
            .get("brief")
            .filter(|b| b.is_object())
            .ok_or_else(|| ServiceError::InvalidResponse("response has no brief".to_string()))?;

        if let Some(session_id) = response.get("session_id").and_then(Value::as_str)
            && let Ok(mut slot) = self.session_id.lock()
        {
            *slot = Some(session_id.to_string());
        }
        Ok(brief.to_string())
    }
}

#[async_trait]
impl ChatService for BackendServices {
    async fn reply(&self, request: ChatRequest<'_>) -> Result<String, ServiceError> {
        let session_id = self.session_id().ok_or_else(|| {
            ServiceError::InvalidResponse("no backend chat session; synthesis has not completed".to_string())
        })?;
        let body = json!({
            "session_id": session_id,
            "message": request.message,
        });

        let response = self.post("/v1/chat", &body).await?;
        response
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ServiceError::InvalidResponse("response has no text".to_string()))
    }
}
