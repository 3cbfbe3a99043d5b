//! Infrastructure layer for parallel-scout
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the browser-automation SSE client, the
//! language-model and REST-backend services, configuration file loading
//! and the JSONL exploration log.

pub mod backend;
pub mod browser;
pub mod config;
mod http;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use backend::BackendServices;
pub use browser::{HttpBrowserAutomation, SseDecoder};
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileBrowserConfig, FileChatConfig,
    FileConfig, FileExplorationConfig, FileLlmConfig, FileOutputConfig, FileOutputFormat,
};
pub use logging::JsonlExplorationLogger;
pub use openai::{ChatCompletionsClient, OpenAiServices};
