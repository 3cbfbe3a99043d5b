//! Plan parsing from planning-service responses.
//!
//! Turns the structured text returned by the planning service into a
//! [`Plan`]. A plan is all-or-nothing: one task with an unusable site
//! rejects the whole plan.

use super::json_block::{extract_json_object, first_string};
use super::value_objects::{Plan, PlannedTask};
use crate::core::site::Site;
use serde_json::Value;
use thiserror::Error;

/// Why a planning response could not become a [`Plan`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanParseError {
    #[error("response is not a JSON object")]
    NotJson,

    #[error("plan contains no tasks")]
    NoTasks,

    #[error("task {index} has an invalid site: {reason}")]
    InvalidSite { index: usize, reason: String },

    #[error("task {index} has no instructions")]
    MissingInstructions { index: usize },
}

const SITE_KEYS: &[&str] = &["website", "site", "url"];
const INSTRUCTION_KEYS: &[&str] = &["instructions", "goal", "description"];

/// Parse a plan from planning-service response text (raw or fenced JSON).
pub fn parse_plan(response: &str) -> Result<Plan, PlanParseError> {
    let json = extract_json_object(response).ok_or(PlanParseError::NotJson)?;
    parse_plan_json(&json)
}

/// Parse a plan from a JSON value.
///
/// Expected schema:
/// ```json
/// {
///   "goal": "string (optional)",
///   "tasks": [
///     { "website": "https://...", "instructions": "string" }
///   ]
/// }
/// ```
///
/// `site` and `url` are accepted in place of `website`.
pub fn parse_plan_json(json: &Value) -> Result<Plan, PlanParseError> {
    let goal = first_string(json, &["goal", "objective"]).unwrap_or_default();

    let tasks = json
        .get("tasks")
        .and_then(Value::as_array)
        .filter(|tasks| !tasks.is_empty())
        .ok_or(PlanParseError::NoTasks)?;

    let tasks = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| parse_task(index, task))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Plan { goal, tasks })
}

fn parse_task(index: usize, task: &Value) -> Result<PlannedTask, PlanParseError> {
    let raw_site = first_string(task, SITE_KEYS).ok_or_else(|| PlanParseError::InvalidSite {
        index,
        reason: "missing".to_string(),
    })?;
    let site = Site::parse(&raw_site).map_err(|e| PlanParseError::InvalidSite {
        index,
        reason: e.to_string(),
    })?;
    let instructions = first_string(task, INSTRUCTION_KEYS)
        .ok_or(PlanParseError::MissingInstructions { index })?;
    Ok(PlannedTask::new(site, instructions))
}
