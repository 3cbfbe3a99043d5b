//! Planner
//!
//! Turns a topic set into ordered PENDING tasks with one call to the
//! planning service.

use crate::config::TaskLimits;
use crate::ports::service::{PlanRequest, PlanningService, ServiceError};
use scout_domain::{ExplorationConfig, PlanParseError, Task, TaskId, TopicSet, parse_plan};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while planning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("Planning service failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Planning service returned an unusable plan: {0}")]
    InvalidPlan(#[from] PlanParseError),
}

/// Accepted output of the planner
#[derive(Debug, Clone)]
pub struct PlannedExploration {
    pub goal: Option<String>,
    /// Ordered, all PENDING.
    pub tasks: Vec<Task>,
}

/// Use case for planning an exploration
pub struct Planner {
    service: Arc<dyn PlanningService>,
    limits: TaskLimits,
}

impl Planner {
    pub fn new(service: Arc<dyn PlanningService>) -> Self {
        Self {
            service,
            limits: TaskLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: TaskLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Plan the exploration; at most the depth's task limit is kept.
    pub async fn plan(
        &self,
        topics: &TopicSet,
        config: &ExplorationConfig,
    ) -> Result<PlannedExploration, PlanningError> {
        let max_tasks = self.limits.for_depth(config.depth()).max(1);
        let request = PlanRequest {
            topics: topics.as_slice().to_vec(),
            depth: config.depth(),
            time_budget_minutes: config.time_budget_minutes(),
            max_tasks,
        };

        info!("Planning exploration for: {}", topics.joined());
        let response = self.service.plan(&request).await?;
        let mut plan = parse_plan(&response)?;

        if plan.tasks.len() > max_tasks {
            warn!(
                "Planner returned {} tasks, keeping the first {} for depth {}",
                plan.tasks.len(),
                max_tasks,
                config.depth()
            );
            plan.tasks.truncate(max_tasks);
        }

        let tasks = plan
            .tasks
            .into_iter()
            .enumerate()
            .map(|(i, planned)| Task::new(TaskId::for_index(i), planned.site, planned.instructions))
            .collect::<Vec<_>>();
        info!("Plan ready with {} task(s)", tasks.len());

        Ok(PlannedExploration {
            goal: Some(plan.goal).filter(|g| !g.trim().is_empty()),
            tasks,
        })
    }
}
