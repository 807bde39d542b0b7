//! Topología de los pasos del guion.
//!
//! Un paso (`StepNode`) sólo conoce su id, su forma de salida (`StepKind`) y
//! si exige texto libre antes de avanzar. Títulos, descripciones y respuestas
//! del asistente viven en el crate de dominio, de modo que la máquina de
//! estados se prueba sin superficie de render.

mod id;
mod kind;
mod status;

pub use id::StepId;
pub use kind::{Branch, DecisionPath, InputKind, StepKind, StepNode};
pub use status::StepStatus;
