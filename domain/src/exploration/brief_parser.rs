//! Brief parsing from synthesis-service responses.

use super::json_block::{extract_json_object, first_string, non_empty_string};
use super::value_objects::{Brief, Finding};
use serde_json::Value;

const FINDING_KEYS: &[&str] = &["top_findings", "topFindings", "top_3_things", "findings"];
const INSIGHT_KEYS: &[&str] = &["insights", "one_deeper_insight", "deeper_insight"];
const OPPORTUNITY_KEYS: &[&str] = &["opportunities", "one_opportunity", "opportunity"];
const SOURCE_KEYS: &[&str] = &["sources", "sources_used"];

/// Parse a brief from synthesis-service response text.
///
/// Returns `None` if the response holds no JSON object. Missing sections
/// become empty lists; the result is [`Brief::normalized`].
pub fn parse_brief(response: &str) -> Option<Brief> {
    extract_json_object(response).map(|json| parse_brief_json(&json))
}

/// Parse a brief from a JSON value.
///
/// Each section may be a list or a single value; findings may be plain
/// strings or objects with `title`, `summary`, `why_it_matters` and
/// `source_link`.
pub fn parse_brief_json(json: &Value) -> Brief {
    Brief {
        top_findings: section(json, FINDING_KEYS)
            .iter()
            .filter_map(parse_finding)
            .collect(),
        insights: strings(json, INSIGHT_KEYS),
        opportunities: strings(json, OPPORTUNITY_KEYS),
        sources: strings(json, SOURCE_KEYS),
    }
    .normalized()
}

fn section(json: &Value, keys: &[&str]) -> Vec<Value> {
    match keys.iter().find_map(|key| json.get(*key)) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single.clone()],
    }
}

fn strings(json: &Value, keys: &[&str]) -> Vec<String> {
    section(json, keys)
        .iter()
        .filter_map(|item| match item {
            Value::Object(_) => first_string(item, &["text", "title", "summary", "url"]),
            other => non_empty_string(other),
        })
        .collect()
}

fn parse_finding(item: &Value) -> Option<Finding> {
    match item {
        Value::Object(_) => Some(Finding {
            title: first_string(item, &["title", "headline", "summary"])?,
            summary: first_string(item, &["summary", "description"])
                .filter(|s| Some(s.as_str()) != item.get("title").and_then(Value::as_str)),
            why_it_matters: first_string(item, &["why_it_matters", "whyItMatters"]),
            source_link: first_string(item, &["source_link", "sourceLink", "source", "url"]),
        }),
        other => non_empty_string(other).map(Finding::titled),
    }
}
