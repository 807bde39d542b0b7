use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::errors::GraphError;
use crate::step::{StepId, StepKind, StepNode};

/// Invariantes estructurales: aristas resueltas, decisiones con dos destinos
/// distintos, al menos un terminal, sin ciclos y todo alcanzable desde la
/// entrada.
pub(super) fn check(entry: StepId, nodes: &BTreeMap<StepId, StepNode>) -> Result<(), GraphError> {
    if !nodes.contains_key(&entry) {
        return Err(GraphError::MissingEntry(entry));
    }

    for node in nodes.values() {
        if let StepKind::Decision { true_positive,
                                    false_positive, } = node.kind
        {
            if true_positive.next == false_positive.next {
                return Err(GraphError::DegenerateDecision(node.id));
            }
        }
        for to in node.kind.successors() {
            if !nodes.contains_key(&to) {
                return Err(GraphError::DanglingEdge { from: node.id, to });
            }
        }
    }

    if !nodes.values().any(|n| n.kind.is_terminal()) {
        return Err(GraphError::NoTerminal);
    }

    check_acyclic(nodes)?;

    let reached = reachable(entry, nodes);
    if let Some(orphan) = nodes.keys().find(|id| !reached.contains(id)) {
        return Err(GraphError::Unreachable(*orphan));
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Done,
}

fn check_acyclic(nodes: &BTreeMap<StepId, StepNode>) -> Result<(), GraphError> {
    let mut marks: BTreeMap<StepId, Mark> = BTreeMap::new();
    for id in nodes.keys() {
        visit(*id, nodes, &mut marks)?;
    }
    Ok(())
}

fn visit(id: StepId, nodes: &BTreeMap<StepId, StepNode>, marks: &mut BTreeMap<StepId, Mark>) -> Result<(), GraphError> {
    match marks.get(&id) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Open) => return Err(GraphError::Cycle(id)),
        None => {}
    }
    marks.insert(id, Mark::Open);
    if let Some(node) = nodes.get(&id) {
        for next in node.kind.successors() {
            visit(next, nodes, marks)?;
        }
    }
    marks.insert(id, Mark::Done);
    Ok(())
}

pub(super) fn reachable(entry: StepId, nodes: &BTreeMap<StepId, StepNode>) -> BTreeSet<StepId> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([entry]);
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(node) = nodes.get(&id) {
            queue.extend(node.kind.successors());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use crate::errors::GraphError;
    use crate::step::StepId;
    use crate::StepGraph;

    #[test]
    fn rejects_missing_entry() {
        let err = StepGraph::builder().linear(1, 2).terminal(2).build().unwrap_err();
        assert_eq!(err, GraphError::MissingEntry(StepId(0)));
    }

    #[test]
    fn rejects_dangling_edges() {
        let err = StepGraph::builder().linear(0, 7).terminal(1).build().unwrap_err();
        assert_eq!(err, GraphError::DanglingEdge { from: StepId(0), to: StepId(7) });
    }

    #[test]
    fn rejects_degenerate_decision() {
        let err = StepGraph::builder().decision(0, 1, 1).terminal(1).build().unwrap_err();
        assert_eq!(err, GraphError::DegenerateDecision(StepId(0)));
    }

    #[test]
    fn rejects_cycles() {
        let err = StepGraph::builder().linear(0, 1)
                                      .decision(1, 0, 2)
                                      .terminal(2)
                                      .build()
                                      .unwrap_err();
        assert!(matches!(err, GraphError::Cycle(_)), "got {err:?}");
    }

    #[test]
    fn rejects_unreachable_steps() {
        let err = StepGraph::builder().linear(0, 1)
                                      .terminal(1)
                                      .linear(2, 1)
                                      .build()
                                      .unwrap_err();
        assert_eq!(err, GraphError::Unreachable(StepId(2)));
    }

    #[test]
    fn rejects_graph_without_terminal() {
        let err = StepGraph::builder().linear(0, 1).linear(1, 0).build().unwrap_err();
        assert_eq!(err, GraphError::NoTerminal);
    }
}
