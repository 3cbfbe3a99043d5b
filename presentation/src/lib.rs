//! Presentation layer for parallel-scout
//!
//! This crate contains the CLI definition, the progress display, the
//! brief formatter and the interactive follow-up chat.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress, task_line};
