//! Port for the machine-readable exploration record.
//!
//! Tracing covers diagnostics. This port receives the record of one
//! exploration (plan, task events, task results, brief, failure) so an
//! adapter can persist it and a reader can replay it per task later.

use serde_json::Value;

/// One entry of the exploration record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorationLogEvent {
    /// Exploration this entry belongs to.
    pub exploration_id: String,
    /// Set for entries about a single task.
    pub task_id: Option<String>,
    /// Entry kind, e.g. "plan", "task_event", "brief".
    pub kind: &'static str,
    pub data: Value,
}

impl ExplorationLogEvent {
    pub fn new(exploration_id: impl Into<String>, kind: &'static str, data: Value) -> Self {
        Self {
            exploration_id: exploration_id.into(),
            task_id: None,
            kind,
            data,
        }
    }

    pub fn for_task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }
}

/// Sink for the exploration record. Write failures are the adapter's concern.
pub trait ExplorationLogger: Send + Sync {
    fn log(&self, event: ExplorationLogEvent);
}

/// Discards every entry.
pub struct NoExplorationLogger;

impl ExplorationLogger for NoExplorationLogger {
    fn log(&self, _event: ExplorationLogEvent) {}
}
