//! Chat session
//!
//! Follow-up questions grounded in a finished exploration.

use crate::ports::service::{ChatRequest, ChatService, ServiceError};
use scout_domain::{ChatContext, ChatMessage};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during one chat exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Chat service failed: {0}")]
    Service(#[from] ServiceError),
}

/// Use case for follow-up chat
///
/// Holds no conversation state: the caller owns the history and gets the
/// extended history back from every successful [`ask`](Self::ask).
pub struct ChatSession {
    service: Arc<dyn ChatService>,
    max_history: usize,
}

impl ChatSession {
    pub const DEFAULT_MAX_HISTORY: usize = 20;

    pub fn new(service: Arc<dyn ChatService>) -> Self {
        Self {
            service,
            max_history: Self::DEFAULT_MAX_HISTORY,
        }
    }

    /// Only the last `max` messages of the history are sent to the service.
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }

    /// Ask a question; returns `history` followed by the user message and
    /// the assistant reply.
    ///
    /// On error the history is untouched.
    pub async fn ask(
        &self,
        context: &ChatContext,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let window = &history[history.len().saturating_sub(self.max_history)..];
        debug!("Chat request with {} of {} history message(s)", window.len(), history.len());

        let reply = self
            .service
            .reply(ChatRequest {
                context,
                history: window,
                message,
            })
            .await?;

        let mut extended = history.to_vec();
        extended.push(ChatMessage::user(message));
        extended.push(ChatMessage::assistant(reply.trim()));
        Ok(extended)
    }
}
