//! alertflow: recorrido interactivo en terminal de la investigación de una
//! alerta de cumplimiento transaccional.

pub mod config;
pub mod errors;
pub mod inspect;
pub mod render;
pub mod session;

pub use config::AppConfig;
pub use errors::AppError;
pub use session::{Session, SessionClock, SessionReport, UserAction};
