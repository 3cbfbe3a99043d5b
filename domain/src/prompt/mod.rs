//! Prompt domain
//!
//! Templates for the planning, synthesis and chat requests.

mod template;

pub use template::{NO_FINDINGS_MARKER, PromptTemplate, RAW_RESULT_LIMIT};
