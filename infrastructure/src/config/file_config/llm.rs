//! Language-model configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat-completions settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// API key (usually supplied through `OPENAI_API_KEY`).
    pub api_key: Option<String>,
    /// Base URL of the API; `/v1/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    /// Timeout for one planning, synthesis or chat request.
    pub request_timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            request_timeout_seconds: 300,
        }
    }
}
