//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_session;
pub mod event_stream;
pub mod plan_exploration;
pub mod run_exploration;
pub mod run_task;
pub mod synthesize_brief;
