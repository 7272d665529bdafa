//! Adapter between the chat runtime and the orchestration backend
//!
//! [`ChatModelAdapter::run`] executes one turn. Backend failures never
//! escape as errors: they come back as a [`RunOutcome::SoftFailure`] with a
//! fixed apology so the conversation always gets its assistant turn.
//! Cancellation is the only `Err` path.

mod backend;
mod error;

#[cfg(test)]
pub mod testing;

pub use backend::BackendAdapter;
pub use error::{AdapterError, AdapterErrorKind, Cancelled};

use crate::conversation::{Turn, TurnMetadata};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Content of a soft-failure turn
pub const APOLOGY_MESSAGE: &str =
    "Sorry, I encountered an error communicating with the backend. Please try again.";

/// Common interface for turn execution
#[async_trait]
pub trait ChatModelAdapter: Send + Sync {
    /// Run one turn given the full prior conversation.
    ///
    /// Returns `Err(Cancelled)` only if `cancel` fires before the backend
    /// answers.
    async fn run(&self, turns: &[Turn], cancel: CancellationToken)
        -> Result<RunOutcome, Cancelled>;
}

/// Content and metadata for the new assistant turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub content: String,
    pub metadata: TurnMetadata,
}

impl RunResult {
    pub fn soft_failure(error: &AdapterError) -> Self {
        let message = error.to_string();
        let message = if message.is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };

        Self {
            content: APOLOGY_MESSAGE.to_string(),
            metadata: TurnMetadata::failed(message),
        }
    }
}

/// Result of a turn that was not cancelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success(RunResult),
    /// Backend failed; result holds the apology and the error detail
    SoftFailure(RunResult),
}

impl RunOutcome {
    pub fn is_soft_failure(&self) -> bool {
        matches!(self, RunOutcome::SoftFailure(_))
    }

    pub fn result(&self) -> &RunResult {
        match self {
            RunOutcome::Success(result) | RunOutcome::SoftFailure(result) => result,
        }
    }

    pub fn into_result(self) -> RunResult {
        match self {
            RunOutcome::Success(result) | RunOutcome::SoftFailure(result) => result,
        }
    }
}

#[async_trait]
impl<T: ChatModelAdapter + ?Sized> ChatModelAdapter for Arc<T> {
    async fn run(
        &self,
        turns: &[Turn],
        cancel: CancellationToken,
    ) -> Result<RunOutcome, Cancelled> {
        (**self).run(turns, cancel).await
    }
}

/// Logging wrapper for adapters
pub struct LoggingAdapter {
    inner: Arc<dyn ChatModelAdapter>,
}

impl LoggingAdapter {
    pub fn new(inner: Arc<dyn ChatModelAdapter>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ChatModelAdapter for LoggingAdapter {
    async fn run(
        &self,
        turns: &[Turn],
        cancel: CancellationToken,
    ) -> Result<RunOutcome, Cancelled> {
        let start = std::time::Instant::now();
        let result = self.inner.run(turns, cancel).await;
        let duration = start.elapsed();

        match &result {
            Ok(RunOutcome::Success(run)) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    history = turns.len(),
                    events = run.metadata.events.len(),
                    "Turn completed"
                );
            }
            Ok(RunOutcome::SoftFailure(run)) => {
                tracing::warn!(
                    duration_ms = %duration.as_millis(),
                    history = turns.len(),
                    error = run.metadata.error.as_deref().unwrap_or_default(),
                    "Turn recovered from backend failure"
                );
            }
            Err(Cancelled) => {
                tracing::info!(duration_ms = %duration.as_millis(), "Turn cancelled");
            }
        }

        result
    }
}
