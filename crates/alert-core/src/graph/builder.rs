//! Builder de `StepGraph`.
//!
//! Uso típico:
//!
//! ```
//! use alert_core::{DecisionPath, StepGraph, StepId};
//!
//! let graph = StepGraph::builder().linear(0, 1)
//!                                 .decision(1, 2, 3)
//!                                 .terminal(2)
//!                                 .terminal(3)
//!                                 .build()
//!                                 .expect("valid graph");
//! assert_eq!(graph.get(StepId(1)).and_then(|n| n.kind.branch(DecisionPath::FalsePositive)),
//!            Some(StepId(3)));
//! ```

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::{order, validate, StepGraph};
use crate::constants::{ENTRY_STEP, GRAPH_FORMAT_VERSION};
use crate::errors::GraphError;
use crate::hashing::hash_value;
use crate::step::{Branch, InputKind, StepId, StepKind, StepNode};

#[derive(Debug)]
pub struct GraphBuilder {
    entry: StepId,
    nodes: Vec<StepNode>,
    inputs: Vec<(StepId, InputKind)>,
    display_order: Option<Vec<StepId>>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { entry: ENTRY_STEP,
               nodes: Vec::new(),
               inputs: Vec::new(),
               display_order: None }
    }

    /// Cambia el paso inicial (por defecto `ENTRY_STEP`).
    pub fn entry(mut self, id: impl Into<StepId>) -> Self {
        self.entry = id.into();
        self
    }

    pub fn linear(self, id: impl Into<StepId>, next: impl Into<StepId>) -> Self {
        self.push(id.into(), StepKind::Linear { next: next.into() })
    }

    pub fn decision(self, id: impl Into<StepId>, true_positive: impl Into<StepId>, false_positive: impl Into<StepId>) -> Self {
        self.push(id.into(),
                  StepKind::Decision { true_positive: Branch { next: true_positive.into() },
                                       false_positive: Branch { next: false_positive.into() } })
    }

    pub fn terminal(self, id: impl Into<StepId>) -> Self {
        self.push(id.into(), StepKind::Terminal)
    }

    /// Marca un paso lineal como dependiente de texto libre.
    pub fn requires_input(mut self, id: impl Into<StepId>, kind: InputKind) -> Self {
        self.inputs.push((id.into(), kind));
        self
    }

    /// Orden de presentación curado. Se eliminan duplicados (gana la primera
    /// aparición) y se valida contra el conjunto completo al construir.
    pub fn display_order<I, T>(mut self, ids: I) -> Self
        where I: IntoIterator<Item = T>,
              T: Into<StepId>
    {
        self.display_order = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    fn push(mut self, id: StepId, kind: StepKind) -> Self {
        self.nodes.push(StepNode::new(id, kind));
        self
    }

    pub fn build(self) -> Result<StepGraph, GraphError> {
        let mut nodes: BTreeMap<StepId, StepNode> = BTreeMap::new();
        for node in self.nodes {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(GraphError::DuplicateStep(id));
            }
        }

        for (id, kind) in self.inputs {
            let node = nodes.get_mut(&id).ok_or(GraphError::UnknownStep(id))?;
            if node.next().is_none() {
                return Err(GraphError::InputOnNonLinear(id));
            }
            node.requires_input = Some(kind);
        }

        validate::check(self.entry, &nodes)?;

        let display_order = match self.display_order {
            Some(curated) => order::curated(&nodes, curated)?,
            None => order::derived(self.entry, &nodes),
        };

        let definition_hash = hash_value(&topology_value(self.entry, &nodes));
        log::debug!("step graph built: {} steps, hash {}", nodes.len(), definition_hash);

        Ok(StepGraph { entry: self.entry,
                       nodes,
                       display_order,
                       definition_hash })
    }
}

fn topology_value(entry: StepId, nodes: &BTreeMap<StepId, StepNode>) -> Value {
    let steps: Vec<Value> = nodes.values()
                                 .map(|n| {
                                     let kind = match n.kind {
                                         StepKind::Linear { .. } => "linear",
                                         StepKind::Decision { .. } => "decision",
                                         StepKind::Terminal => "terminal",
                                     };
                                     let next: Vec<u8> = n.kind.successors().into_iter().map(StepId::get).collect();
                                     let input = n.requires_input.map(|k| match k {
                                                                     InputKind::Justification => "justification",
                                                                     InputKind::VoiceNote => "voice_note",
                                                                 });
                                     json!({ "id": n.id.get(), "kind": kind, "next": next, "input": input })
                                 })
                                 .collect();
    json!({
        "format": GRAPH_FORMAT_VERSION,
        "entry": entry.get(),
        "steps": steps,
    })
}
