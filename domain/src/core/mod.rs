//! Core domain concepts shared across all subdomains.
//!
//! - [`topic::TopicSet`]: the ordered, deduplicated topics of an exploration
//! - [`site::Site`]: a validated http(s) URL a task browses
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod site;
pub mod topic;
