//! Exploration domain
//!
//! The exploration aggregate, its configuration and the parsers that turn
//! planning and synthesis responses into domain values.

pub mod brief_parser;
pub mod config;
pub mod entities;
pub mod json_block;
pub mod plan_parser;
pub mod value_objects;
