//! Topic set value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered, non-empty, deduplicated topics (Value Object)
///
/// Topics are trimmed; blank entries are dropped and duplicates are removed
/// case-insensitively, keeping the first spelling in its original position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicSet {
    topics: Vec<String>,
}

impl TopicSet {
    /// Build a topic set, failing if nothing usable remains.
    pub fn new<I, S>(topics: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let topics: Vec<String> = topics
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.to_lowercase()))
            .collect();

        if topics.is_empty() {
            return Err(DomainError::NoTopics);
        }
        Ok(Self { topics })
    }

    /// Parse comma-separated input (`"AI agents, browsers"`).
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        Self::new(input.split(','))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(String::as_str)
    }

    /// Topics joined for prompts and display.
    pub fn joined(&self) -> String {
        self.topics.join(", ")
    }
}

impl std::fmt::Display for TopicSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_spelling_and_order() {
        let topics = TopicSet::new(["AI agents", "rust", "ai Agents", " Rust ", "wasm"]).unwrap();
        assert_eq!(topics.as_slice(), &["AI agents", "rust", "wasm"]);
    }

    #[test]
    fn test_blank_topics_rejected() {
        assert_eq!(TopicSet::new(["", "   "]), Err(DomainError::NoTopics));
        assert_eq!(TopicSet::new(Vec::<String>::new()), Err(DomainError::NoTopics));
    }

    #[test]
    fn test_parse_comma_separated() {
        let topics = TopicSet::parse("AI agents, web automation,,browser APIs").unwrap();
        assert_eq!(topics.len(), 3);
        assert_eq!(topics.joined(), "AI agents, web automation, browser APIs");
    }
}
