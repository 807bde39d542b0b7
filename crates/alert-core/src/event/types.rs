//! Tipos de evento de la sesión y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - El `FlowController` emite un evento por cada cambio observable.
//! - El log es append-only y basta para reconstruir el `FlowState` (replay),
//!   ver `repo::ReplayRepository`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TransitionRejected;
use crate::step::{DecisionPath, InputKind, StepId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowEventKind {
    /// Primer evento de toda sesión. Fija la topología usada.
    SessionStarted { definition_hash: String, entry: StepId },
    /// Una acción del usuario fue aceptada; el commit llegará tras el retardo.
    TransitionRequested {
        from: StepId,
        to: StepId,
        path: Option<DecisionPath>,
    },
    /// Texto libre enviado junto con la transición. No se interpreta.
    InputCaptured { step: StepId, kind: InputKind, text: String },
    StepCompleted { step: StepId },
    /// Primer paso de la rama no elegida.
    StepSkipped { step: StepId },
    StepEntered { step: StepId },
    ResponseRevealed { step: StepId },
    /// Se entró en un paso terminal.
    FlowFinished { step: StepId },
    TransitionRejected { step: StepId, reason: TransitionRejected },
    /// Cierre de la sesión; `cancelled` efectos pendientes descartados.
    SessionTornDown { cancelled: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // orden de append
    pub session_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
