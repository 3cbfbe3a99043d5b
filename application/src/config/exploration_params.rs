//! Exploration parameters: orchestrator and task runner control.
//!
//! [`ExplorationParams`] groups the tunable policy of the browsing stage.
//! These are application-layer concerns: the per-exploration
//! [`ExplorationConfig`](scout_domain::ExplorationConfig) says how deep and
//! how long, these say how the work is scheduled.

use crate::ports::browser_automation::BrowserProfile;
use scout_domain::Depth;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum planned tasks per depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLimits {
    pub shallow: usize,
    pub medium: usize,
    pub deep: usize,
}

impl Default for TaskLimits {
    fn default() -> Self {
        Self {
            shallow: 1,
            medium: 2,
            deep: 3,
        }
    }
}

impl TaskLimits {
    pub fn for_depth(&self, depth: Depth) -> usize {
        match depth {
            Depth::Shallow => self.shallow,
            Depth::Medium => self.medium,
            Depth::Deep => self.deep,
        }
    }
}

/// Browsing stage control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationParams {
    /// Tasks streaming at the same time; the rest queue.
    pub max_concurrent_tasks: usize,
    /// A task with no frame for this long ends with a `timeout` error.
    pub inactivity_timeout: Duration,
    pub task_limits: TaskLimits,
    pub browser_profile: BrowserProfile,
    pub proxy_country: Option<String>,
}

impl Default for ExplorationParams {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 2,
            inactivity_timeout: Duration::from_secs(120),
            task_limits: TaskLimits::default(),
            browser_profile: BrowserProfile::default(),
            proxy_country: None,
        }
    }
}

impl ExplorationParams {
    // ==================== Builder Methods ====================

    /// Zero is raised to one.
    pub fn with_max_concurrent_tasks(mut self, max: usize) -> Self {
        self.max_concurrent_tasks = max.max(1);
        self
    }

    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = timeout;
        self
    }

    pub fn with_task_limits(mut self, limits: TaskLimits) -> Self {
        self.task_limits = limits;
        self
    }

    pub fn with_browser_profile(mut self, profile: BrowserProfile) -> Self {
        self.browser_profile = profile;
        self
    }

    pub fn with_proxy_country(mut self, country: Option<String>) -> Self {
        self.proxy_country = country.filter(|c| !c.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExplorationParams::default();
        assert_eq!(params.max_concurrent_tasks, 2);
        assert_eq!(params.inactivity_timeout, Duration::from_secs(120));
        assert_eq!(params.task_limits.for_depth(Depth::Shallow), 1);
        assert_eq!(params.task_limits.for_depth(Depth::Deep), 3);
        assert!(params.proxy_country.is_none());
    }

    #[test]
    fn test_builder() {
        let params = ExplorationParams::default()
            .with_max_concurrent_tasks(0)
            .with_inactivity_timeout(Duration::from_secs(5))
            .with_proxy_country(Some("US".to_string()));

        assert_eq!(params.max_concurrent_tasks, 1);
        assert_eq!(params.inactivity_timeout, Duration::from_secs(5));
        assert_eq!(params.proxy_country.as_deref(), Some("US"));
    }
}
