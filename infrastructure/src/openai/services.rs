//! Planning, synthesis and chat served directly by the language model.

use super::client::{ChatCompletionsClient, message};
use async_trait::async_trait;
use scout_application::{
    ChatRequest, ChatService, PlanRequest, PlanningService, ServiceError, SynthesisRequest,
    SynthesisService,
};
use scout_domain::PromptTemplate;
use tracing::info;

const PLANNING_TEMPERATURE: f32 = 0.7;
const SYNTHESIS_TEMPERATURE: f32 = 0.5;
const CHAT_TEMPERATURE: f32 = 0.7;

/// Implements every service port on top of one chat-completions client.
pub struct OpenAiServices {
    client: ChatCompletionsClient,
}

impl OpenAiServices {
    pub fn new(client: ChatCompletionsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlanningService for OpenAiServices {
    async fn plan(&self, request: &PlanRequest) -> Result<String, ServiceError> {
        info!(model = %self.client.model(), topics = request.topics.len(), "Requesting plan");
        let messages = vec![
            message("system", PromptTemplate::planning_system()),
            message(
                "user",
                PromptTemplate::planning_prompt(
                    &request.topics,
                    request.depth,
                    request.time_budget_minutes,
                    request.max_tasks,
                ),
            ),
        ];
        self.client.complete(messages, PLANNING_TEMPERATURE, true).await
    }
}

#[async_trait]
impl SynthesisService for OpenAiServices {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, ServiceError> {
        info!(model = %self.client.model(), findings = request.findings.len(), "Requesting brief");
        let messages = vec![
            message("system", PromptTemplate::synthesis_system()),
            message(
                "user",
                PromptTemplate::synthesis_prompt(
                    &request.topics,
                    request.goal.as_deref(),
                    &request.findings,
                ),
            ),
        ];
        self.client.complete(messages, SYNTHESIS_TEMPERATURE, true).await
    }
}

#[async_trait]
impl ChatService for OpenAiServices {
    async fn reply(&self, request: ChatRequest<'_>) -> Result<String, ServiceError> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(message("system", PromptTemplate::chat_system(request.context)));
        messages.extend(
            request
                .history
                .iter()
                .map(|m| message(m.role.as_str(), m.text.clone())),
        );
        messages.push(message("user", request.message));
        self.client.complete(messages, CHAT_TEMPERATURE, false).await
    }
}
