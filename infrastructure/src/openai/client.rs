//! Minimal OpenAI-compatible chat-completions client.

use crate::http::{check_status, transport_error};
use reqwest::Client;
use scout_application::ServiceError;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat-completions endpoint with a fixed model.
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ServiceError::ConnectionError(e.to_string()))?;
        Ok(Self::with_client(client, base_url, api_key, model))
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `messages` and return the first choice's content.
    ///
    /// With `json_mode` the model is asked for a JSON object.
    pub async fn complete(
        &self,
        messages: Vec<Value>,
        temperature: f32,
        json_mode: bool,
    ) -> Result<String, ServiceError> {
        let mut payload = json!({
            "model": self.model,
            "temperature": temperature,
            "messages": messages,
        });
        if json_mode {
            payload["response_format"] = json!({ "type": "json_object" });
        }

        debug!(model = %self.model, messages = messages_len(&payload), json_mode, "Sending chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ServiceError::InvalidResponse("response has no message content".to_string()))
    }
}

fn messages_len(payload: &Value) -> usize {
    payload["messages"].as_array().map_or(0, Vec::len)
}

pub(crate) fn message(role: &str, content: impl Into<String>) -> Value {
    json!({ "role": role, "content": content.into() })
}
