//! Errores del core.
//!
//! `GraphError` aparece sólo al construir el grafo. `TransitionRejected` no es
//! un fallo: describe por qué un control está deshabilitado o una acción se
//! ignora, y el estado queda intacto.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::StepId;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GraphError {
    #[error("duplicate step id {0}")] DuplicateStep(StepId),
    #[error("unknown step id {0}")] UnknownStep(StepId),
    #[error("entry step {0} is not defined")] MissingEntry(StepId),
    #[error("step {from} points to undefined successor {to}")] DanglingEdge { from: StepId, to: StepId },
    #[error("decision step {0} must branch to two distinct steps")] DegenerateDecision(StepId),
    #[error("step {0} is not reachable from the entry step")] Unreachable(StepId),
    #[error("cycle detected through step {0}")] Cycle(StepId),
    #[error("graph has no terminal step")] NoTerminal,
    #[error("step {0} requires input but has no single successor")] InputOnNonLinear(StepId),
    #[error("display order does not cover the step set (missing: {missing:?}, unknown: {unknown:?})")]
    DisplayOrderMismatch { missing: Vec<StepId>, unknown: Vec<StepId> },
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionRejected {
    #[error("a transition is already in progress")] Processing,
    #[error("current step is not linear")] NotLinear,
    #[error("current step is not a decision")] NotDecision,
    #[error("current step is terminal")] Terminal,
    #[error("input is required before advancing")] InputRequired,
    #[error("session has been torn down")] TornDown,
}
