//! Exploration value objects - plans, findings and the synthesized brief.

use crate::core::site::Site;
use crate::task::entities::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// One browsing step proposed by the planning service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    pub site: Site,
    pub instructions: String,
}

impl PlannedTask {
    pub fn new(site: Site, instructions: impl Into<String>) -> Self {
        Self {
            site,
            instructions: instructions.into(),
        }
    }
}

/// Output of the planning service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// One-line goal for this exploration (may be empty).
    pub goal: String,
    pub tasks: Vec<PlannedTask>,
}

/// What one finished task contributes to synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFinding {
    pub site: String,
    pub instructions: String,
    pub content: String,
}

impl TaskFinding {
    /// Finding of a successfully completed task, `None` otherwise.
    pub fn from_task(task: &Task) -> Option<Self> {
        if task.status() != TaskStatus::Complete {
            return None;
        }
        Some(Self {
            site: task.site().to_string(),
            instructions: task.instructions().to_string(),
            content: task.result_text().unwrap_or_default(),
        })
    }
}

/// One of the top findings of a brief
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Finding {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_link: Option<String>,
}

impl Finding {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// The synthesized result of an exploration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Brief {
    /// At most [`Brief::MAX_TOP_FINDINGS`]; fewer when the data does not support more.
    pub top_findings: Vec<Finding>,
    pub insights: Vec<String>,
    pub opportunities: Vec<String>,
    /// URLs consulted.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Brief {
    pub const MAX_TOP_FINDINGS: usize = 3;

    /// Enforce the brief's shape: drop blank entries, cap findings at three.
    pub fn normalized(mut self) -> Self {
        self.top_findings.retain(|f| !f.title.trim().is_empty());
        self.top_findings.truncate(Self::MAX_TOP_FINDINGS);
        for list in [&mut self.insights, &mut self.opportunities, &mut self.sources] {
            list.retain(|s| !s.trim().is_empty());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.top_findings.is_empty() && self.insights.is_empty() && self.opportunities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::entities::TaskId;
    use crate::task::event::{Event, EventKind};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_normalized_caps_findings() {
        let brief = Brief {
            top_findings: (1..=5).map(|i| Finding::titled(format!("f{i}"))).collect(),
            insights: vec!["".into(), "pattern".into()],
            ..Default::default()
        }
        .normalized();
        assert_eq!(brief.top_findings.len(), 3);
        assert_eq!(brief.insights, vec!["pattern".to_string()]);
    }

    #[test]
    fn test_finding_only_from_completed_task() {
        let site = Site::parse("https://example.com").unwrap();
        let mut task = Task::new(TaskId::for_index(0), site, "look");
        assert!(TaskFinding::from_task(&task).is_none());

        let payload = json!({"resultJson": "three stories"}).as_object().cloned().unwrap();
        task.apply_event(Event::new(EventKind::Complete, Utc::now(), payload));
        let finding = TaskFinding::from_task(&task).unwrap();
        assert_eq!(finding.content, "three stories");
        assert_eq!(finding.site, "https://example.com");
    }
}
