//! alert-domain: el guion de la investigación de la alerta 2025-452.
//!
//! Contiene todo el contenido de presentación (títulos, descripciones,
//! comandos, respuestas del asistente y etiquetas fijas) y lo une a la
//! topología de `alert-core` en un `Script` validado.

pub mod content;
pub mod errors;
pub mod labels;
pub mod script;

pub use content::{Bullet, DecisionLabels, FindingIcon, InputPrompt, Response, ResponseBlock, StepContent, Tone};
pub use errors::DomainError;
pub use script::{Script, CURATED_DISPLAY_ORDER};
