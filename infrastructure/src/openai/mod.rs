//! OpenAI-compatible language-model adapters

mod client;
mod services;

pub use client::ChatCompletionsClient;
pub use services::OpenAiServices;
