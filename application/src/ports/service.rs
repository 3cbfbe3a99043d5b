//! Language-service ports
//!
//! Planning, synthesis and chat are request/response calls to an external
//! service (an LLM directly, or the REST backend). Each port returns the
//! service's structured text; the use cases turn it into domain values.

use async_trait::async_trait;
use scout_domain::{ChatContext, ChatMessage, Depth, TaskFinding};
use thiserror::Error;

/// Errors shared by the planning, synthesis and chat services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unauthorized: check the API key")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out")]
    Timeout,
}

/// Request for a browsing plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub topics: Vec<String>,
    pub depth: Depth,
    pub time_budget_minutes: u32,
    /// Upper bound on tasks for this depth.
    pub max_tasks: usize,
}

/// Request for a brief over the successful task results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub topics: Vec<String>,
    pub goal: Option<String>,
    /// Empty when no task succeeded.
    pub findings: Vec<TaskFinding>,
}

impl SynthesisRequest {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Request for one follow-up chat reply
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub context: &'a ChatContext,
    /// Prior messages, oldest first, already bounded.
    pub history: &'a [ChatMessage],
    pub message: &'a str,
}

/// Produces browsing plans
#[async_trait]
pub trait PlanningService: Send + Sync {
    /// Returns the plan as JSON text (`{goal, tasks: [{website, instructions}]}`).
    async fn plan(&self, request: &PlanRequest) -> Result<String, ServiceError>;
}

/// Produces briefs from task results
#[async_trait]
pub trait SynthesisService: Send + Sync {
    /// Returns the brief as JSON text.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, ServiceError>;
}

/// Answers follow-up questions about a finished exploration
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Returns the assistant reply text.
    async fn reply(&self, request: ChatRequest<'_>) -> Result<String, ServiceError>;
}
