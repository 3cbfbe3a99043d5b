//! Task entity: one planned browsing action and its observed state.

use super::event::{Event, EventKind};
use super::failure::{FailureKind, TaskFailure};
use super::live_view::extract_live_view_url;
use crate::core::site::Site;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a task, unique within one exploration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `task-1`, `task-2`, ... for the task at `index`.
    pub fn for_index(index: usize) -> Self {
        Self(format!("task-{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a task
///
/// Transitions are monotonic: `Pending → Started → Progress* → (Complete | Error)`.
/// `Error` is also reachable directly from `Pending` when the browse request
/// cannot be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    Started,
    Progress,
    Complete,
    Error,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Started => "STARTED",
            TaskStatus::Progress => "PROGRESS",
            TaskStatus::Complete => "COMPLETE",
            TaskStatus::Error => "ERROR",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Complete | TaskStatus::Error)
    }

    fn rank(&self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::Started => 1,
            TaskStatus::Progress => 2,
            TaskStatus::Complete | TaskStatus::Error => 3,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload statuses of a COMPLETE event that count as success.
const SUCCESS_STATUSES: &[&str] = &["COMPLETED", "COMPLETE", "SUCCESS", "SUCCEEDED"];

/// A planned browsing task and everything observed while running it (Entity)
///
/// Created by the planner in [`TaskStatus::Pending`] and mutated only by the
/// runner that owns it. Every mutation goes through [`Task::mark_started`] or
/// [`Task::apply_event`]; both are no-ops once the task is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    site: Site,
    instructions: String,
    status: TaskStatus,
    live_view_url: Option<String>,
    run_id: Option<String>,
    events: Vec<Event>,
    result: Option<Value>,
    error: Option<TaskFailure>,
}

impl Task {
    pub fn new(id: TaskId, site: Site, instructions: impl Into<String>) -> Self {
        Self {
            id,
            site,
            instructions: instructions.into(),
            status: TaskStatus::Pending,
            live_view_url: None,
            run_id: None,
            events: Vec::new(),
            result: None,
            error: None,
        }
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn live_view_url(&self) -> Option<&str> {
        self.live_view_url.as_deref()
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&TaskFailure> {
        self.error.as_ref()
    }

    // ==================== Transitions ====================

    /// The browse request was issued: `Pending → Started`.
    ///
    /// Returns `false` if the task had already moved past `Pending`.
    pub fn mark_started(&mut self) -> bool {
        self.advance(TaskStatus::Started)
    }

    /// Record an event and apply its effect on the task.
    ///
    /// Returns `false` (and records nothing) when the task is already
    /// terminal. A STARTED arriving after PROGRESS is still recorded but
    /// does not move the status backward.
    pub fn apply_event(&mut self, event: Event) -> bool {
        if self.is_terminal() {
            return false;
        }

        match event.kind {
            EventKind::Started => {
                self.advance(TaskStatus::Started);
                if self.run_id.is_none() {
                    self.run_id = event.field("runId").map(str::to_string);
                }
                self.capture_live_view(&event);
            }
            EventKind::Progress => {
                self.advance(TaskStatus::Progress);
                self.capture_live_view(&event);
            }
            EventKind::Complete => match event.field("status") {
                Some(status) if !SUCCESS_STATUSES.contains(&status.to_uppercase().as_str()) => {
                    self.error = Some(TaskFailure::new(
                        FailureKind::Automation,
                        format!("automation finished with status {status}"),
                    ));
                    self.status = TaskStatus::Error;
                }
                _ => {
                    self.result = Some(
                        event
                            .payload
                            .get("resultJson")
                            .or_else(|| event.payload.get("result"))
                            .cloned()
                            .unwrap_or_else(|| Value::Object(event.payload.clone())),
                    );
                    self.status = TaskStatus::Complete;
                }
            },
            EventKind::Error => {
                self.error = Some(TaskFailure::from_error_event(&event));
                self.status = TaskStatus::Error;
            }
        }

        self.events.push(event);
        true
    }

    fn advance(&mut self, next: TaskStatus) -> bool {
        if self.is_terminal() || next.rank() < self.status.rank() {
            return false;
        }
        if next == self.status && next != TaskStatus::Progress {
            return false;
        }
        self.status = next;
        true
    }

    /// First live-view URL wins so the link shown to the user stays stable.
    fn capture_live_view(&mut self, event: &Event) {
        if self.live_view_url.is_none() {
            self.live_view_url = extract_live_view_url(&event.payload);
        }
    }

    /// Text of the result for synthesis and chat context.
    pub fn result_text(&self) -> Option<String> {
        self.result.as_ref().map(|value| match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        })
    }
}
