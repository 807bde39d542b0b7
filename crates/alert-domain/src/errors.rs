// errors.rs
use alert_core::{GraphError, StepId};
use thiserror::Error;

/// Error del dominio al ensamblar el guion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Topología inválida: {0}")]
    Graph(#[from] GraphError),

    #[error("Falta contenido para el paso {0}")]
    MissingContent(StepId),

    #[error("Contenido para un paso inexistente: {0}")]
    OrphanContent(StepId),

    #[error("Etiquetas de decisión inconsistentes en el paso {0}")]
    DecisionLabels(StepId),
}
