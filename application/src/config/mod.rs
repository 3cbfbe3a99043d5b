//! Application-level configuration.
//!
//! - [`ExplorationParams`]: browsing stage control (concurrency, inactivity, task limits)

pub mod exploration_params;

pub use exploration_params::{ExplorationParams, TaskLimits};
