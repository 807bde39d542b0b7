//! Propiedades de `status` y de las transiciones sobre secuencias
//! arbitrarias de acciones.

use std::collections::BTreeSet;
use std::sync::Arc;

use alert_core::{Clock, DecisionPath, FlowController, InputKind, StepGraph, StepId, StepStatus, VirtualClock};
use proptest::prelude::*;

fn investigation_topology() -> Arc<StepGraph> {
    Arc::new(StepGraph::builder().linear(0, 1)
                                 .linear(1, 2)
                                 .linear(2, 3)
                                 .linear(3, 4)
                                 .decision(4, 5, 6)
                                 .linear(5, 7)
                                 .linear(6, 8)
                                 .requires_input(6, InputKind::Justification)
                                 .linear(7, 9)
                                 .requires_input(7, InputKind::VoiceNote)
                                 .terminal(8)
                                 .terminal(9)
                                 .build()
                                 .expect("valid topology"))
}

#[derive(Debug, Clone)]
enum Action {
    Proceed,
    Choose(DecisionPath),
    Type(String),
    Wait(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![3 => Just(Action::Proceed),
                1 => Just(Action::Choose(DecisionPath::TruePositive)),
                1 => Just(Action::Choose(DecisionPath::FalsePositive)),
                1 => "[ a-z]{0,8}".prop_map(Action::Type),
                3 => (0u64..1500).prop_map(Action::Wait),]
}

proptest! {
    #[test]
    fn exactly_one_current_and_no_revisits(actions in prop::collection::vec(action(), 0..60)) {
        let graph = investigation_topology();
        let clock = VirtualClock::new();
        let mut c = FlowController::builder(graph.clone()).start(clock.now());
        let mut visited = vec![c.current_id()];

        for a in actions {
            match a {
                Action::Proceed => { let _ = c.advance_linear(clock.now()); }
                Action::Choose(path) => { let _ = c.advance_by_decision(path, clock.now()); }
                Action::Type(text) => { c.set_input(text); }
                Action::Wait(ms) => { c.tick(clock.advance_ms(ms)); }
            }
            if visited.last() != Some(&c.current_id()) {
                visited.push(c.current_id());
            }

            let sidebar = c.sidebar();
            prop_assert_eq!(sidebar.len(), graph.len());
            let current: Vec<StepId> = sidebar.iter().filter(|(_, s)| *s == StepStatus::Current).map(|(id, _)| *id).collect();
            prop_assert_eq!(current, vec![c.current_id()]);
            for (id, status) in &sidebar {
                prop_assert_eq!(*status, c.status(*id));
            }
            prop_assert!(c.state().completed().is_disjoint(c.state().skipped()));
        }

        let unique: BTreeSet<StepId> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), visited.len(), "revisited a step: {:?}", visited);
        prop_assert!(visited.len() <= 8, "more than 7 transitions: {:?}", visited);
        let tp: BTreeSet<StepId> = [5u8, 7, 9].into_iter().map(StepId).collect();
        let fp: BTreeSet<StepId> = [6u8, 8].into_iter().map(StepId).collect();
        prop_assert!(!(visited.iter().any(|id| tp.contains(id)) && visited.iter().any(|id| fp.contains(id))));
    }

    #[test]
    fn status_is_idempotent(waits in prop::collection::vec(0u64..2000, 1..10)) {
        let clock = VirtualClock::new();
        let mut c = FlowController::builder(investigation_topology()).start(clock.now());
        for w in waits {
            let _ = c.advance_linear(clock.now());
            c.tick(clock.advance_ms(w));
            let first = c.sidebar();
            let second = c.sidebar();
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn every_walk_reaches_a_terminal_without_revisits() {
    let graph = investigation_topology();
    for path in [DecisionPath::TruePositive, DecisionPath::FalsePositive] {
        let mut id = graph.entry();
        let mut hops = 0;
        let mut seen = BTreeSet::from([id]);
        loop {
            let node = graph.get(id).expect("known step");
            let next = match node.kind.branch(path) {
                Some(next) => next,
                None => match node.next() {
                    Some(next) => next,
                    None => break,
                },
            };
            hops += 1;
            assert!(seen.insert(next), "revisited {next}");
            id = next;
        }
        assert!(graph.terminals().contains(&id));
        let expected = match path {
            DecisionPath::TruePositive => 7,
            DecisionPath::FalsePositive => 6,
        };
        assert_eq!(hops, expected, "hops on {path:?}");
    }
}
