//! Event timeline projection
//!
//! The side panel always shows the trace of the newest assistant turn.
//! Traces of earlier turns are never merged in.

#[cfg(test)]
mod proptests;

use crate::conversation::{Role, Turn};
use crate::events::EventRecord;

/// Events of the most recent assistant turn, or empty if there is none.
///
/// Pure function of `turns`; callers recompute it whenever the conversation
/// changes.
pub fn project(turns: &[Turn]) -> &[EventRecord] {
    turns
        .iter()
        .rev()
        .find(|turn| turn.role == Role::Assistant)
        .map(Turn::events)
        .unwrap_or_default()
}
