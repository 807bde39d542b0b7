//! Errores de la aplicación.

use alert_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuración inválida: {var}={value}")]
    Config { var: &'static str, value: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Error de logging: {0}")]
    Logging(String),
}
