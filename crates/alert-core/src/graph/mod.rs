//! Grafo de pasos inmutable.
//!
//! Se construye una sola vez con `GraphBuilder`, que valida la topología y
//! fija el orden de presentación. Después sólo se consulta.

mod builder;
mod order;
mod validate;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::step::{StepId, StepNode};

pub use builder::GraphBuilder;

#[derive(Debug, Clone, Serialize)]
pub struct StepGraph {
    entry: StepId,
    nodes: BTreeMap<StepId, StepNode>,
    display_order: Vec<StepId>,
    definition_hash: String,
}

impl StepGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Paso inicial.
    pub fn entry(&self) -> StepId {
        self.entry
    }

    pub fn get(&self, id: StepId) -> Option<&StepNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &StepNode> {
        self.nodes.values()
    }

    pub fn terminals(&self) -> Vec<StepId> {
        self.nodes
            .values()
            .filter(|n| n.kind.is_terminal())
            .map(|n| n.id)
            .collect()
    }

    /// Orden de la barra lateral: cada id exactamente una vez.
    pub fn display_order(&self) -> &[StepId] {
        &self.display_order
    }

    /// Hash blake3 de la topología en JSON canónico.
    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
