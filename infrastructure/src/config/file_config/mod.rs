//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod browser;
mod exploration;
mod llm;
mod output;

pub use browser::FileBrowserConfig;
pub use exploration::FileExplorationConfig;
pub use llm::FileLlmConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use scout_application::ExplorationParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("browser.api_key is required (set MINO_API_KEY)")]
    MissingBrowserApiKey,

    #[error("llm.api_key is required unless backend.url is set (set OPENAI_API_KEY)")]
    MissingLlmApiKey,

    #[error("{0} cannot be 0")]
    Zero(&'static str),

    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },
}

/// Optional REST backend that serves planning, synthesis and chat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub url: Option<String>,
}

/// Raw chat configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Messages of history sent with each question.
    pub max_history: usize,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self { max_history: 20 }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Planning, synthesis and chat model
    pub llm: FileLlmConfig,
    /// Browser-automation service
    pub browser: FileBrowserConfig,
    /// Optional REST backend
    pub backend: FileBackendConfig,
    /// Exploration policy
    pub exploration: FileExplorationConfig,
    /// Follow-up chat settings
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// The backend URL, when backend mode is configured.
    pub fn backend_url(&self) -> Option<&str> {
        self.backend
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Scheduling and browser parameters for the exploration workflow.
    pub fn exploration_params(&self) -> ExplorationParams {
        self.exploration
            .to_params()
            .with_browser_profile(self.browser.browser_profile)
            .with_proxy_country(self.browser.proxy_country.clone())
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if is_blank(&self.browser.api_key) {
            issues.push(ConfigValidationError::MissingBrowserApiKey);
        }
        if self.backend_url().is_none() && is_blank(&self.llm.api_key) {
            issues.push(ConfigValidationError::MissingLlmApiKey);
        }

        let counts: [(&'static str, u64); 5] = [
            ("exploration.time_budget_minutes", self.exploration.time_budget_minutes.into()),
            ("exploration.max_concurrent_tasks", self.exploration.max_concurrent_tasks as u64),
            ("exploration.inactivity_timeout_seconds", self.exploration.inactivity_timeout_seconds),
            ("llm.request_timeout_seconds", self.llm.request_timeout_seconds),
            ("chat.max_history", self.chat.max_history as u64),
        ];
        issues.extend(
            counts
                .into_iter()
                .filter(|(_, value)| *value == 0)
                .map(|(field, _)| ConfigValidationError::Zero(field)),
        );

        let urls = [
            ("llm.base_url", Some(self.llm.base_url.as_str())),
            ("browser.base_url", Some(self.browser.base_url.as_str())),
            ("backend.url", self.backend_url()),
        ];
        for (field, value) in urls {
            if let Some(value) = value
                && reqwest::Url::parse(value).is_err()
            {
                issues.push(ConfigValidationError::InvalidUrl {
                    field,
                    value: value.to_string(),
                });
            }
        }

        issues
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_domain::{Depth, OutputFormat};

    fn valid() -> FileConfig {
        let mut config = FileConfig::default();
        config.browser.api_key = Some("mino-key".to_string());
        config.llm.api_key = Some("sk-test".to_string());
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[llm]
model = "gpt-4o-mini"

[browser]
base_url = "https://automation.example"

[backend]
url = "http://localhost:8000"

[exploration]
depth = "shallow"
max_concurrent_tasks = 3

[chat]
max_history = 6

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.browser.base_url, "https://automation.example");
        assert_eq!(config.backend_url(), Some("http://localhost:8000"));
        assert_eq!(config.exploration.depth, Depth::Shallow);
        assert_eq!(config.exploration.max_concurrent_tasks, 3);
        assert_eq!(config.chat.max_history, 6);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.exploration.inactivity_timeout_seconds, 120);
        assert_eq!(config.exploration.max_concurrent_tasks, 2);
    }

    #[test]
    fn test_valid_config_has_no_issues() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn test_missing_keys() {
        let issues = FileConfig::default().validate();
        assert!(issues.contains(&ConfigValidationError::MissingBrowserApiKey));
        assert!(issues.contains(&ConfigValidationError::MissingLlmApiKey));
    }

    #[test]
    fn test_backend_mode_does_not_need_llm_key() {
        let mut config = valid();
        config.llm.api_key = None;
        config.backend.url = Some("http://localhost:8000".to_string());
        assert!(config.validate().is_empty());

        config.backend.url = Some("   ".to_string());
        assert_eq!(config.validate(), vec![ConfigValidationError::MissingLlmApiKey]);
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = valid();
        config.exploration.time_budget_minutes = 0;
        config.exploration.max_concurrent_tasks = 0;
        let issues = config.validate();
        assert_eq!(
            issues,
            vec![
                ConfigValidationError::Zero("exploration.time_budget_minutes"),
                ConfigValidationError::Zero("exploration.max_concurrent_tasks"),
            ]
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = valid();
        config.browser.base_url = "mino".to_string();
        assert!(matches!(
            config.validate().as_slice(),
            [ConfigValidationError::InvalidUrl { field: "browser.base_url", .. }]
        ));
    }
}
