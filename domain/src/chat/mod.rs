//! Follow-up chat domain

use crate::exploration::entities::Exploration;
use crate::exploration::value_objects::{Brief, TaskFinding};
use serde::{Deserialize, Serialize};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of a follow-up conversation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// What a follow-up conversation is grounded in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChatContext {
    pub topics: Vec<String>,
    pub goal: Option<String>,
    pub brief: Brief,
    /// Raw results of the tasks that completed.
    pub findings: Vec<TaskFinding>,
}

impl ChatContext {
    pub fn new(brief: Brief) -> Self {
        Self {
            brief,
            ..Default::default()
        }
    }

    /// Context of a finished exploration; `None` until it has a brief.
    pub fn from_exploration(exploration: &Exploration) -> Option<Self> {
        Some(Self {
            topics: exploration.topics().as_slice().to_vec(),
            goal: exploration.goal().map(str::to_string),
            brief: exploration.brief()?.clone(),
            findings: exploration.findings(),
        })
    }
}
