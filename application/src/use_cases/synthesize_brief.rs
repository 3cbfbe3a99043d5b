//! Synthesizer
//!
//! One request/response against the synthesis service. Never retries.

use crate::ports::service::{ServiceError, SynthesisRequest, SynthesisService};
use scout_domain::{Brief, TaskFinding, parse_brief};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during synthesis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Synthesis service failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Synthesis service returned no brief: {0}")]
    InvalidBrief(String),
}

/// Use case for synthesizing a brief
pub struct Synthesizer {
    service: Arc<dyn SynthesisService>,
}

impl Synthesizer {
    pub fn new(service: Arc<dyn SynthesisService>) -> Self {
        Self { service }
    }

    /// Synthesize a brief from the successful task results.
    ///
    /// An empty `findings` set is sent as-is; the service is told there is
    /// nothing to report rather than being skipped.
    pub async fn synthesize(
        &self,
        topics: &[String],
        goal: Option<&str>,
        findings: Vec<TaskFinding>,
    ) -> Result<Brief, SynthesisError> {
        if findings.is_empty() {
            warn!("Synthesizing with no findings");
        } else {
            info!("Synthesizing brief from {} result(s)", findings.len());
        }

        let request = SynthesisRequest {
            topics: topics.to_vec(),
            goal: goal.map(str::to_string),
            findings,
        };
        let response = self.service.synthesize(&request).await?;
        parse_brief(&response).ok_or_else(|| {
            SynthesisError::InvalidBrief(scout_domain::util::truncate(&response, 200))
        })
    }
}
