//! Exploration configuration value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// How deep an exploration digs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    /// Headlines only
    Shallow,
    /// Read the top discussions
    #[default]
    Medium,
    /// Follow comments and linked articles
    Deep,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Shallow => "shallow",
            Depth::Medium => "medium",
            Depth::Deep => "deep",
        }
    }

    /// What the planning service is told this depth means.
    pub fn guidance(&self) -> &'static str {
        match self {
            Depth::Shallow => "headlines only",
            Depth::Medium => "read the top discussions",
            Depth::Deep => "explore comments and linked articles",
        }
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Depth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shallow" => Ok(Depth::Shallow),
            "medium" => Ok(Depth::Medium),
            "deep" => Ok(Depth::Deep),
            other => Err(DomainError::InvalidDepth(other.to_string())),
        }
    }
}

/// Immutable settings of one exploration (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationConfig {
    depth: Depth,
    time_budget_minutes: u32,
}

impl ExplorationConfig {
    pub fn new(depth: Depth, time_budget_minutes: u32) -> Result<Self, DomainError> {
        if time_budget_minutes == 0 {
            return Err(DomainError::InvalidConfig(
                "time budget must be at least one minute".to_string(),
            ));
        }
        Ok(Self {
            depth,
            time_budget_minutes,
        })
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn time_budget_minutes(&self) -> u32 {
        self.time_budget_minutes
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(u64::from(self.time_budget_minutes) * 60)
    }
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            depth: Depth::Medium,
            time_budget_minutes: 5,
        }
    }
}
