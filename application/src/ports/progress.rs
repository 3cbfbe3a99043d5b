//! Progress notification port
//!
//! Defines the interface for reporting progress during an exploration.

use scout_domain::{Brief, ExplorationStatus, Task};

/// Callback for progress updates during an exploration
///
/// Implementations live in the presentation layer. Every method has a no-op
/// default so displays implement only what they show.
pub trait ExplorationProgressNotifier: Send + Sync {
    /// Called when the exploration enters a new status
    fn on_status_change(&self, _status: ExplorationStatus) {}

    /// Called once the plan is accepted, before any task starts
    fn on_plan_ready(&self, _goal: Option<&str>, _tasks: &[Task]) {}

    /// Called with the latest snapshot whenever task `index` changes
    fn on_task_update(&self, _index: usize, _task: &Task) {}

    /// Called when the overall time budget elapsed with tasks still running
    fn on_budget_exceeded(&self, _running: usize) {}

    /// Called when synthesis produced a brief
    fn on_brief_ready(&self, _brief: &Brief) {}

    /// Called when the exploration failed
    fn on_failed(&self, _cause: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ExplorationProgressNotifier for NoProgress {}
