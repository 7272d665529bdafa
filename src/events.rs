//! Orchestration trace records
//!
//! The backend reports the steps it took to produce an answer as a list of
//! [`EventRecord`]s. Records arrive from an external service, so parsing is
//! lenient: unknown actions are kept verbatim, the optional fields are
//! independent of each other, integral float steps are accepted and `null`
//! text reads as empty.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the backend's orchestration trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based position within the turn's trace
    #[serde(deserialize_with = "lenient_step")]
    pub step: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub agent: String,
    pub action: Action,
    /// Tool invoked by this step. Expected only for `use_tool`, not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Agent this step handed off to. Expected only for `delegate`, not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_agent: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thought: String,
}

/// Accepts `1` and `1.0`; rejects fractional, negative and oversized steps
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_step<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return u32::try_from(n).map_err(de::Error::custom);
    }
    match number.as_f64() {
        Some(f) if (0.0..=f64::from(u32::MAX)).contains(&f) && f.fract() == 0.0 => {
            Ok(f as u32)
        }
        _ => Err(de::Error::custom(format!("invalid step number: {number}"))),
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl EventRecord {
    pub fn new(
        step: u32,
        agent: impl Into<String>,
        action: impl Into<Action>,
        thought: impl Into<String>,
    ) -> Self {
        Self {
            step,
            agent: agent.into(),
            action: action.into(),
            tool: None,
            target_agent: None,
            thought: thought.into(),
        }
    }

    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    #[must_use]
    pub fn with_target_agent(mut self, target: impl Into<String>) -> Self {
        self.target_agent = Some(target.into());
        self
    }
}

/// Kind of step an agent took
///
/// Serialized as the plain wire string. Values outside the known set are
/// preserved in [`Action::Other`] so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    UseTool,
    Delegate,
    Final,
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::UseTool => "use_tool",
            Action::Delegate => "delegate",
            Action::Final => "final",
            Action::Other(raw) => raw,
        }
    }

    /// Display category for this action. Total: unknown kinds are neutral.
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::UseTool => ActionCategory::ToolUse,
            Action::Delegate => ActionCategory::Delegation,
            Action::Final => ActionCategory::Finalization,
            Action::Other(_) => ActionCategory::Neutral,
        }
    }
}

impl From<String> for Action {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "use_tool" => Action::UseTool,
            "delegate" => Action::Delegate,
            "final" => Action::Final,
            _ => Action::Other(raw),
        }
    }
}

impl From<&str> for Action {
    fn from(raw: &str) -> Self {
        Action::from(raw.to_string())
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display emphasis for an event step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    ToolUse,
    Delegation,
    Finalization,
    /// Default for action kinds the client does not know about
    Neutral,
}
