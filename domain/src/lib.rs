//! Domain layer for parallel-scout
//!
//! This crate contains the exploration model: entities, value objects and
//! the pure transformations between service responses and domain values.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Exploration
//!
//! One end-to-end run for a topic set, moving through
//! `PLANNING → BROWSING → SYNTHESIZING → DONE` (or `FAILED`).
//!
//! ## Task
//!
//! One planned browsing action against a site, driven by a stream of
//! [`Event`]s whose status only moves forward:
//! `PENDING → STARTED → PROGRESS* → (COMPLETE | ERROR)`.
//!
//! ## Brief
//!
//! The synthesized result: top findings, insights and opportunities.

pub mod chat;
pub mod config;
pub mod core;
pub mod exploration;
pub mod prompt;
pub mod stream;
pub mod task;
pub mod util;

// Re-export commonly used types
pub use chat::{ChatContext, ChatMessage, ChatRole};
pub use config::OutputFormat;
pub use core::{error::DomainError, site::Site, topic::TopicSet};
pub use exploration::{
    brief_parser::{parse_brief, parse_brief_json},
    config::{Depth, ExplorationConfig},
    entities::{Exploration, ExplorationFailure, ExplorationStatus},
    json_block::extract_json_object,
    plan_parser::{PlanParseError, parse_plan, parse_plan_json},
    value_objects::{Brief, Finding, Plan, PlannedTask, TaskFinding},
};
pub use prompt::{NO_FINDINGS_MARKER, PromptTemplate, RAW_RESULT_LIMIT};
pub use stream::frame::{DecodedFrame, RawFrame, decode_frame};
pub use task::{
    entities::{Task, TaskId, TaskStatus},
    event::{Event, EventKind, Payload},
    failure::{FailureKind, TaskFailure},
    live_view::extract_live_view_url,
};
