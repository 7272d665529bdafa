//! Mini-AGI Chat
//!
//! Chat client for a multi-agent orchestration backend. Each assistant turn
//! carries the backend's orchestration trace, and the newest trace is shown
//! as the agent timeline.

pub mod adapter;
pub mod config;
pub mod conversation;
pub mod events;
pub mod render;
pub mod runtime;
pub mod timeline;

pub use adapter::{BackendAdapter, Cancelled, ChatModelAdapter, LoggingAdapter, RunOutcome};
pub use config::ChatConfig;
pub use conversation::{Conversation, Role, Turn, TurnMetadata};
pub use events::{Action, ActionCategory, EventRecord};
pub use runtime::{LocalRuntime, RuntimeError, TurnOutcome};
