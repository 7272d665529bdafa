//! Plain-text rendering of the thread and the agent timeline panel

use crate::conversation::{Role, Turn};
use crate::events::{ActionCategory, EventRecord};

const TIMELINE_TITLE: &str = "Agent Timeline";
const TIMELINE_SUBTITLE: &str = "Internal orchestration steps";

pub fn render_turn(turn: &Turn) -> String {
    let prefix = match turn.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };

    let mut out = format!("{prefix}> {}", turn.content);
    if let Some(error) = turn.error() {
        out.push_str("\n  (");
        out.push_str(error);
        out.push(')');
    }
    out
}

pub fn render_thread(turns: &[Turn]) -> String {
    turns.iter().map(render_turn).collect::<Vec<_>>().join("\n")
}

fn category_marker(category: ActionCategory) -> char {
    match category {
        ActionCategory::ToolUse => '>',
        ActionCategory::Delegation => '~',
        ActionCategory::Finalization => '*',
        ActionCategory::Neutral => '-',
    }
}

/// Render one event. Tool and delegation lines are independent; both
/// appear when the backend sends both.
pub fn render_event(event: &EventRecord) -> Vec<String> {
    let marker = category_marker(event.action.category());
    let mut lines = vec![format!(
        "Step {} • {}  {marker}[{}]",
        event.step, event.agent, event.action
    )];

    if let Some(tool) = event.tool.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("  Tool: {tool}"));
    }
    if let Some(target) = event.target_agent.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("  Delegated to: {target}"));
    }
    lines.push(format!("  Thought: {}", event.thought));
    lines
}

pub fn render_timeline(events: &[EventRecord]) -> String {
    let mut lines = vec![
        TIMELINE_TITLE.to_string(),
        TIMELINE_SUBTITLE.to_string(),
        String::new(),
    ];

    if events.is_empty() {
        lines.push("No events yet.".to_string());
        lines.push("Send a message to see the agent workflow.".to_string());
    } else {
        for event in events {
            lines.extend(render_event(event));
            lines.push(String::new());
        }
        lines.pop();
    }

    lines.join("\n")
}
