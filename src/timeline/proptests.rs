//! Property-based tests for the timeline projection
//!
//! - Projection equals the events of the last assistant turn
//! - Projection never includes events from earlier turns
//! - Recomputing on an unchanged conversation gives the same result

use super::project;
use crate::conversation::{Role, Turn, TurnMetadata};
use crate::events::EventRecord;
use proptest::prelude::*;

fn arb_action() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("use_tool".to_string()),
        Just("delegate".to_string()),
        Just("final".to_string()),
        "[a-z_]{1,12}",
    ]
}

fn arb_events() -> impl Strategy<Value = Vec<EventRecord>> {
    proptest::collection::vec(
        (
            "[a-z_]{1,12}",
            arb_action(),
            proptest::option::of("[a-z_]{1,12}"),
            proptest::option::of("[a-z_]{1,12}"),
            "[a-zA-Z0-9 .,]{0,40}",
        ),
        0..6,
    )
    .prop_map(|steps| {
        steps
            .into_iter()
            .zip(1u32..)
            .map(|((agent, action, tool, target, thought), step)| EventRecord {
                step,
                agent,
                action: action.into(),
                tool,
                target_agent: target,
                thought,
            })
            .collect()
    })
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    prop_oneof![
        "[a-z ]{1,20}".prop_map(Turn::user),
        ("[a-z ]{1,20}", arb_events())
            .prop_map(|(text, events)| Turn::assistant(text, TurnMetadata::with_events(events))),
        ("[a-z ]{1,20}", "[a-z ]{1,20}")
            .prop_map(|(text, error)| Turn::assistant(text, TurnMetadata::failed(error))),
    ]
}

fn arb_turns() -> impl Strategy<Value = Vec<Turn>> {
    proptest::collection::vec(arb_turn(), 0..10)
}

proptest! {
    #[test]
    fn prop_matches_last_assistant(turns in arb_turns()) {
        let expected = turns
            .iter()
            .filter(|t| t.role == Role::Assistant)
            .last()
            .map(|t| t.events().to_vec())
            .unwrap_or_default();

        prop_assert_eq!(project(&turns).to_vec(), expected);
    }

    #[test]
    fn prop_recompute_is_stable(turns in arb_turns()) {
        let first = project(&turns).to_vec();
        let second = project(&turns).to_vec();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_new_assistant_replaces_trace(
        turns in arb_turns(),
        e1 in arb_events(),
        e2 in arb_events(),
    ) {
        let mut turns = turns;
        turns.push(Turn::assistant("first", TurnMetadata::with_events(e1)));
        turns.push(Turn::user("next"));
        turns.push(Turn::assistant("second", TurnMetadata::with_events(e2.clone())));

        prop_assert_eq!(project(&turns), e2.as_slice());
    }
}
