//! Task runner
//!
//! Owns the lifecycle of one planned browsing task: launches it, feeds its
//! events into the [`Task`], and guarantees the task ends COMPLETE or ERROR.

use super::event_stream::{EventStreamReader, StreamItem};
use crate::ports::browser_automation::{BrowseRequest, BrowserAutomation, BrowserError};
use scout_domain::{Event, FailureKind, Task};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors returned by [`TaskRunner::start`].
///
/// The task itself already records the failure; this is informational.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskRunError {
    #[error("Connection error: {0}")]
    Connection(#[from] BrowserError),

    #[error("Cancelled before the task started")]
    Cancelled,
}

/// Latest snapshot of task `index`, sent to the single writer.
pub type TaskUpdate = (usize, Task);

/// Drives one task to a terminal state.
pub struct TaskRunner {
    index: usize,
    task: Task,
    reader: Option<EventStreamReader>,
    inactivity_timeout: Duration,
    cancel: CancellationToken,
    cancel_reason: String,
}

impl TaskRunner {
    pub fn new(index: usize, task: Task, inactivity_timeout: Duration) -> Self {
        Self {
            index,
            task,
            reader: None,
            inactivity_timeout,
            cancel: CancellationToken::new(),
            cancel_reason: "cancelled".to_string(),
        }
    }

    /// Terminate the task with a `budget-exceeded` error when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken, reason: impl Into<String>) -> Self {
        self.cancel = cancel;
        self.cancel_reason = reason.into();
        self
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Issue the browse request and bind its event stream: `PENDING → STARTED`.
    ///
    /// On failure the task becomes ERROR with a `connection` failure.
    pub async fn start(
        &mut self,
        browser: &dyn BrowserAutomation,
        request: &BrowseRequest,
    ) -> Result<(), TaskRunError> {
        if self.task.is_terminal() || self.reader.is_some() {
            return Ok(());
        }

        let launched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            launched = browser.launch(request) => Some(launched),
        };
        let Some(launched) = launched else {
            self.terminate(FailureKind::BudgetExceeded, self.cancel_reason.clone());
            return Err(TaskRunError::Cancelled);
        };

        match launched {
            Ok(stream) => {
                info!(task = %self.task.id(), site = %self.task.site(), "Task started");
                self.task.mark_started();
                self.reader = Some(EventStreamReader::new(stream));
                Ok(())
            }
            Err(e) => {
                warn!(task = %self.task.id(), error = %e, "Failed to start task");
                self.terminate(FailureKind::Connection, e.to_string());
                Err(TaskRunError::Connection(e))
            }
        }
    }

    /// Consume the next event and apply it to the task.
    ///
    /// Suspends until an event arrives, the inactivity window elapses, the
    /// stream ends or the runner is cancelled. Returns `true` if the task
    /// changed; a no-op returning `false` once the task is terminal.
    pub async fn pump(&mut self) -> bool {
        if self.task.is_terminal() {
            return false;
        }
        let Some(reader) = self.reader.as_mut() else {
            return false;
        };

        loop {
            let item = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                item = tokio::time::timeout(self.inactivity_timeout, reader.next()) => Some(item),
            };
            let Some(item) = item else {
                self.terminate(FailureKind::BudgetExceeded, self.cancel_reason.clone());
                return true;
            };

            match item {
                Err(_) => {
                    let message = format!(
                        "no event received for {}s",
                        self.inactivity_timeout.as_secs()
                    );
                    warn!(task = %self.task.id(), "{}", message);
                    self.terminate(FailureKind::Timeout, message);
                    return true;
                }
                Ok(None) => {
                    self.terminate(
                        FailureKind::Connection,
                        "stream closed before the task finished",
                    );
                    return true;
                }
                Ok(Some(StreamItem::KeepAlive)) => {
                    debug!(task = %self.task.id(), "Keep-alive");
                }
                Ok(Some(StreamItem::Event(event))) => {
                    debug!(task = %self.task.id(), event = %event.summary(), "Task event");
                    let terminal = event.is_terminal();
                    self.task.apply_event(event);
                    if terminal {
                        info!(task = %self.task.id(), status = %self.task.status(), "Task finished");
                    }
                    return true;
                }
            }
        }
    }

    /// Start the task and pump it to completion, sending a snapshot to
    /// `updates` after every change. Returns the terminal task.
    pub async fn run(
        mut self,
        browser: &dyn BrowserAutomation,
        request: &BrowseRequest,
        updates: &mpsc::Sender<TaskUpdate>,
    ) -> Task {
        let _ = self.start(browser, request).await;
        self.publish(updates).await;

        while !self.task.is_terminal() {
            if !self.pump().await {
                break;
            }
            self.publish(updates).await;
        }

        self.task
    }

    /// End the task with a synthetic ERROR event (no-op once terminal).
    pub fn terminate(&mut self, kind: FailureKind, message: impl Into<String>) {
        if let Some(reader) = self.reader.as_mut() {
            reader.close();
        }
        self.task
            .apply_event(Event::synthetic_error(kind.as_str(), message));
    }

    async fn publish(&self, updates: &mpsc::Sender<TaskUpdate>) {
        // The receiver is gone only when the orchestrator stopped listening
        let _ = updates.send((self.index, self.task.clone())).await;
    }
}
