//! Local chat runtime
//!
//! Owns the [`Conversation`] and drives one turn at a time through a
//! [`ChatModelAdapter`]. `submit` takes `&mut self`, so a second turn cannot
//! start while one is pending.

use crate::adapter::{ChatModelAdapter, RunOutcome};
use crate::conversation::{Conversation, Turn};
use crate::events::EventRecord;
use crate::timeline;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("message is empty")]
    EmptyInput,
}

/// How a submitted turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Backend answered; assistant turn appended
    Completed,
    /// Backend failed; apology turn appended
    Recovered,
    /// Caller cancelled; only the user turn was appended
    Cancelled,
}

pub struct LocalRuntime<A> {
    adapter: A,
    conversation: Conversation,
}

impl<A: ChatModelAdapter> LocalRuntime<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            conversation: Conversation::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Events of the newest assistant turn
    pub fn timeline(&self) -> &[EventRecord] {
        timeline::project(self.conversation.turns())
    }

    /// Append a user turn and run it through the adapter.
    pub async fn submit(
        &mut self,
        text: &str,
        cancel: CancellationToken,
    ) -> Result<TurnOutcome, RuntimeError> {
        if text.trim().is_empty() {
            return Err(RuntimeError::EmptyInput);
        }

        self.conversation.append(Turn::user(text));

        let Ok(outcome) = self.adapter.run(self.conversation.turns(), cancel).await else {
            tracing::info!(
                turns = self.conversation.len(),
                "Turn cancelled, nothing appended"
            );
            return Ok(TurnOutcome::Cancelled);
        };

        let turn_outcome = if outcome.is_soft_failure() {
            TurnOutcome::Recovered
        } else {
            TurnOutcome::Completed
        };

        self.conversation.append(assistant_turn(outcome));

        Ok(turn_outcome)
    }
}

fn assistant_turn(outcome: RunOutcome) -> Turn {
    let result = outcome.into_result();
    Turn::assistant(result.content, result.metadata)
}
