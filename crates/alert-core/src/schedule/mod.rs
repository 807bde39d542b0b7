//! Efectos diferidos y reloj.
//!
//! Una transición no muta el estado de inmediato: deja dos efectos en la
//! `Timeline` (commit y reveal) con su instante de vencimiento. Quien conduce
//! la sesión lee un `Clock` y llama a `FlowController::tick`. En tests el
//! reloj es virtual y se avanza a mano.

mod clock;
mod timeline;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{INITIAL_REVEAL_DELAY_MS, PROCESSING_DELAY_MS, REVEAL_DELAY_MS};
use crate::step::StepId;

pub use clock::{Clock, VirtualClock};
pub use timeline::{ScheduledEffect, Timeline};

/// Retardos de las dos fases de una transición.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Fase "procesando" hasta que cambia el paso.
    pub processing: Duration,
    /// Desde el cambio de paso hasta mostrar la respuesta.
    pub reveal: Duration,
    /// Primera respuesta tras arrancar.
    pub initial_reveal: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self { processing: Duration::from_millis(PROCESSING_DELAY_MS),
               reveal: Duration::from_millis(REVEAL_DELAY_MS),
               initial_reveal: Duration::from_millis(INITIAL_REVEAL_DELAY_MS) }
    }
}

impl Timing {
    /// Sin retardos; útil para recorrer el guion de forma instantánea.
    pub fn immediate() -> Self {
        Self { processing: Duration::ZERO,
               reveal: Duration::ZERO,
               initial_reveal: Duration::ZERO }
    }
}

/// Cambio de paso ya decidido, pendiente de aplicar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCommit {
    pub from: StepId,
    pub to: StepId,
    /// Sucesor de la rama descartada, sólo en decisiones.
    pub skipped: Option<StepId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Fase 1: completa el paso de origen y entra en el destino.
    Commit(PendingCommit),
    /// Fase 2: libera el cerrojo de procesamiento y muestra la respuesta.
    Reveal,
}
