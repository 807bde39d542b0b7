//! Constantes del motor.

use crate::step::StepId;

/// Versión del formato de topología. Entra en el hash de definición, así que
/// un cambio incompatible del modelo produce un hash distinto aunque el guion
/// no cambie.
pub const GRAPH_FORMAT_VERSION: &str = "AF1.0";

/// Paso inicial de todo guion.
pub const ENTRY_STEP: StepId = StepId(0);

/// Fase 1: tiempo que el flujo permanece "procesando" antes de cambiar de paso.
pub const PROCESSING_DELAY_MS: u64 = 1000;

/// Fase 2: tiempo adicional hasta mostrar de nuevo la respuesta.
pub const REVEAL_DELAY_MS: u64 = 300;

/// Retardo de la primera respuesta al arrancar la sesión.
pub const INITIAL_REVEAL_DELAY_MS: u64 = 500;
