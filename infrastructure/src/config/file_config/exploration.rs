//! Exploration configuration from TOML (`[exploration]` section)

use scout_application::{ExplorationParams, TaskLimits};
use scout_domain::{Depth, DomainError, ExplorationConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw exploration configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExplorationConfig {
    pub depth: Depth,
    pub time_budget_minutes: u32,
    pub max_concurrent_tasks: usize,
    pub inactivity_timeout_seconds: u64,
    /// Maximum planned tasks per depth.
    pub shallow_tasks: usize,
    pub medium_tasks: usize,
    pub deep_tasks: usize,
}

impl Default for FileExplorationConfig {
    fn default() -> Self {
        let limits = TaskLimits::default();
        let params = ExplorationParams::default();
        Self {
            depth: Depth::default(),
            time_budget_minutes: 5,
            max_concurrent_tasks: params.max_concurrent_tasks,
            inactivity_timeout_seconds: params.inactivity_timeout.as_secs(),
            shallow_tasks: limits.shallow,
            medium_tasks: limits.medium,
            deep_tasks: limits.deep,
        }
    }
}

impl FileExplorationConfig {
    pub fn task_limits(&self) -> TaskLimits {
        TaskLimits {
            shallow: self.shallow_tasks,
            medium: self.medium_tasks,
            deep: self.deep_tasks,
        }
    }

    pub fn to_exploration_config(&self) -> Result<ExplorationConfig, DomainError> {
        ExplorationConfig::new(self.depth, self.time_budget_minutes)
    }

    /// Scheduling parameters (browser options are set by the caller).
    pub fn to_params(&self) -> ExplorationParams {
        ExplorationParams::default()
            .with_max_concurrent_tasks(self.max_concurrent_tasks)
            .with_inactivity_timeout(Duration::from_secs(self.inactivity_timeout_seconds))
            .with_task_limits(self.task_limits())
    }
}
