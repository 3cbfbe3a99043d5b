//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("At least one topic is required")]
    NoTopics,

    #[error("Invalid site `{site}`: {reason}")]
    InvalidSite { site: String, reason: String },

    #[error("Invalid exploration config: {0}")]
    InvalidConfig(String),

    #[error("Invalid depth: {0} (expected shallow, medium or deep)")]
    InvalidDepth(String),

    #[error("Cannot move exploration from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Unknown task index {0}")]
    UnknownTask(usize),
}

impl DomainError {
    pub(crate) fn transition(from: impl ToString, to: impl ToString) -> Self {
        DomainError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_display() {
        let error = DomainError::transition("DONE", "BROWSING");
        assert_eq!(
            error.to_string(),
            "Cannot move exploration from DONE to BROWSING"
        );
    }

    #[test]
    fn test_invalid_site_display() {
        let error = DomainError::InvalidSite {
            site: "ftp://x".to_string(),
            reason: "unsupported scheme".to_string(),
        };
        assert!(error.to_string().contains("ftp://x"));
    }
}
