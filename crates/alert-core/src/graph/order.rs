//! Orden de presentación de la barra lateral.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexSet;

use crate::errors::GraphError;
use crate::step::{StepId, StepNode};

/// Pre-orden en profundidad desde la entrada; la rama de verdadero positivo
/// se recorre antes que la de falso positivo.
pub(super) fn derived(entry: StepId, nodes: &BTreeMap<StepId, StepNode>) -> Vec<StepId> {
    let mut order: IndexSet<StepId> = IndexSet::with_capacity(nodes.len());
    let mut stack = vec![entry];
    while let Some(id) = stack.pop() {
        if !order.insert(id) {
            continue;
        }
        if let Some(node) = nodes.get(&id) {
            stack.extend(node.kind.successors().into_iter().rev());
        }
    }
    order.into_iter().collect()
}

/// Deduplica por id conservando la primera aparición y exige que el resultado
/// sea una permutación exacta de los ids del grafo.
pub(super) fn curated(nodes: &BTreeMap<StepId, StepNode>, ids: Vec<StepId>) -> Result<Vec<StepId>, GraphError> {
    let order: IndexSet<StepId> = ids.into_iter().collect();
    let known: BTreeSet<StepId> = nodes.keys().copied().collect();

    let missing: Vec<StepId> = known.iter().filter(|id| !order.contains(*id)).copied().collect();
    let unknown: Vec<StepId> = order.iter().filter(|id| !known.contains(*id)).copied().collect();
    if !missing.is_empty() || !unknown.is_empty() {
        return Err(GraphError::DisplayOrderMismatch { missing, unknown });
    }
    Ok(order.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use crate::errors::GraphError;
    use crate::step::StepId;
    use crate::StepGraph;

    fn three() -> crate::GraphBuilder {
        StepGraph::builder().linear(0, 1).linear(1, 2).terminal(2)
    }

    #[test]
    fn curated_order_drops_duplicates() {
        let graph = three().display_order([2u8, 0, 2, 1, 0]).build().expect("valid");
        assert_eq!(graph.display_order(), &[StepId(2), StepId(0), StepId(1)]);
    }

    #[test]
    fn curated_order_must_cover_every_step() {
        let err = three().display_order([0u8, 1, 1, 9]).build().unwrap_err();
        assert_eq!(err,
                   GraphError::DisplayOrderMismatch { missing: vec![StepId(2)],
                                                      unknown: vec![StepId(9)] });
    }
}
