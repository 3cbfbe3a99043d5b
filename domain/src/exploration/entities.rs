//! Exploration entity and its status state machine.

use super::config::ExplorationConfig;
use super::value_objects::{Brief, TaskFinding};
use crate::core::error::DomainError;
use crate::core::topic::TopicSet;
use crate::task::entities::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of an exploration
///
/// `Planning → Browsing → Synthesizing → Done`, with `Failed` reachable from
/// any non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExplorationStatus {
    Planning,
    Browsing,
    Synthesizing,
    Done,
    Failed,
}

impl ExplorationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplorationStatus::Planning => "PLANNING",
            ExplorationStatus::Browsing => "BROWSING",
            ExplorationStatus::Synthesizing => "SYNTHESIZING",
            ExplorationStatus::Done => "DONE",
            ExplorationStatus::Failed => "FAILED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExplorationStatus::Planning => "Planning",
            ExplorationStatus::Browsing => "Browsing",
            ExplorationStatus::Synthesizing => "Synthesizing",
            ExplorationStatus::Done => "Done",
            ExplorationStatus::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExplorationStatus::Done | ExplorationStatus::Failed)
    }
}

impl std::fmt::Display for ExplorationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage an exploration failed in, with the originating error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationFailure {
    pub stage: ExplorationStatus,
    pub cause: String,
}

impl std::fmt::Display for ExplorationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed while {}: {}", self.stage.display_name().to_lowercase(), self.cause)
    }
}

/// One end-to-end run of plan → browse → synthesize (Entity)
///
/// Owned by the orchestrator, which is its only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exploration {
    id: String,
    config: ExplorationConfig,
    topics: TopicSet,
    goal: Option<String>,
    tasks: Vec<Task>,
    status: ExplorationStatus,
    brief: Option<Brief>,
    failure: Option<ExplorationFailure>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Exploration {
    pub fn new(id: impl Into<String>, topics: TopicSet, config: ExplorationConfig) -> Self {
        Self {
            id: id.into(),
            config,
            topics,
            goal: None,
            tasks: Vec::new(),
            status: ExplorationStatus::Planning,
            brief: None,
            failure: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &ExplorationConfig {
        &self.config
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn status(&self) -> ExplorationStatus {
        self.status
    }

    pub fn brief(&self) -> Option<&Brief> {
        self.brief.as_ref()
    }

    pub fn failure(&self) -> Option<&ExplorationFailure> {
        self.failure.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// True once every task is COMPLETE or ERROR (vacuously true with no tasks).
    pub fn all_tasks_terminal(&self) -> bool {
        self.tasks.iter().all(Task::is_terminal)
    }

    /// Findings of the tasks that completed successfully, in plan order.
    pub fn findings(&self) -> Vec<TaskFinding> {
        self.tasks.iter().filter_map(TaskFinding::from_task).collect()
    }

    pub fn count_tasks(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status() == status).count()
    }

    // ==================== Transitions ====================

    /// `Planning → Browsing` with the planned tasks.
    pub fn begin_browsing(&mut self, goal: Option<String>, tasks: Vec<Task>) -> Result<(), DomainError> {
        self.expect(ExplorationStatus::Planning, ExplorationStatus::Browsing)?;
        self.goal = goal.filter(|g| !g.trim().is_empty());
        self.tasks = tasks;
        self.status = ExplorationStatus::Browsing;
        Ok(())
    }

    /// Replace the task at `index` with a newer snapshot from its runner.
    ///
    /// Returns `Ok(false)` when the stored task is already terminal; a
    /// terminal task is never overwritten.
    pub fn update_task(&mut self, index: usize, task: Task) -> Result<bool, DomainError> {
        if self.status != ExplorationStatus::Browsing {
            return Err(DomainError::transition(self.status, "task update"));
        }
        let slot = self
            .tasks
            .get_mut(index)
            .ok_or(DomainError::UnknownTask(index))?;
        if slot.is_terminal() {
            return Ok(false);
        }
        *slot = task;
        Ok(true)
    }

    /// `Browsing → Synthesizing`; every task must be terminal.
    pub fn begin_synthesis(&mut self) -> Result<(), DomainError> {
        self.expect(ExplorationStatus::Browsing, ExplorationStatus::Synthesizing)?;
        if !self.all_tasks_terminal() {
            return Err(DomainError::transition(
                format!("{} with running tasks", self.status),
                ExplorationStatus::Synthesizing,
            ));
        }
        self.status = ExplorationStatus::Synthesizing;
        Ok(())
    }

    /// `Synthesizing → Done` with the brief.
    pub fn finish(&mut self, brief: Brief) -> Result<(), DomainError> {
        self.expect(ExplorationStatus::Synthesizing, ExplorationStatus::Done)?;
        self.brief = Some(brief);
        self.status = ExplorationStatus::Done;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    /// Any non-terminal status `→ Failed`, recording the cause.
    pub fn fail(&mut self, cause: impl Into<String>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::transition(self.status, ExplorationStatus::Failed));
        }
        self.failure = Some(ExplorationFailure {
            stage: self.status,
            cause: cause.into(),
        });
        self.status = ExplorationStatus::Failed;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    fn expect(&self, from: ExplorationStatus, to: ExplorationStatus) -> Result<(), DomainError> {
        if self.status == from {
            Ok(())
        } else {
            Err(DomainError::transition(self.status, to))
        }
    }
}
