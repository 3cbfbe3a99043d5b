//! Application layer for parallel-scout
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExplorationParams, TaskLimits};
pub use ports::{
    browser_automation::{BrowseRequest, BrowserAutomation, BrowserError, BrowserProfile, FrameStream},
    exploration_logger::{ExplorationLogEvent, ExplorationLogger, NoExplorationLogger},
    progress::{ExplorationProgressNotifier, NoProgress},
    service::{
        ChatRequest, ChatService, PlanRequest, PlanningService, ServiceError, SynthesisRequest,
        SynthesisService,
    },
};
pub use use_cases::chat_session::{ChatError, ChatSession};
pub use use_cases::event_stream::{EventStreamReader, StreamItem};
pub use use_cases::plan_exploration::{PlannedExploration, Planner, PlanningError};
pub use use_cases::run_exploration::{
    RunExplorationError, RunExplorationInput, RunExplorationUseCase,
};
pub use use_cases::run_task::{TaskRunError, TaskRunner, TaskUpdate};
pub use use_cases::synthesize_brief::{SynthesisError, Synthesizer};
