//! Conversation model
//!
//! A [`Conversation`] is an append-only list of [`Turn`]s. Assistant turns
//! produced through the backend carry the orchestration trace for that turn
//! in their [`TurnMetadata`].

use crate::events::EventRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Metadata attached to an assistant turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMetadata {
    #[serde(default)]
    pub events: Vec<EventRecord>,
    /// Set when the turn is a soft failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TurnMetadata {
    pub fn with_events(events: Vec<EventRecord>) -> Self {
        Self {
            events,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            events: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// One message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TurnMetadata>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, content: String, metadata: Option<TurnMetadata>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), None)
    }

    pub fn assistant(content: impl Into<String>, metadata: TurnMetadata) -> Self {
        Self::new(Role::Assistant, content.into(), Some(metadata))
    }

    /// Events recorded for this turn, empty when there is no metadata
    pub fn events(&self) -> &[EventRecord] {
        self.metadata
            .as_ref()
            .map(|metadata| metadata.events.as_slice())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        self.metadata.as_ref()?.error.as_deref()
    }
}

/// Ordered, append-only sequence of turns
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        tracing::debug!(turn_id = %turn.id, role = ?turn.role, "Appending turn");
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
