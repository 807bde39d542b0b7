//! Controlador del flujo: estado, transiciones en dos fases y helpers.
//!
//! - `FlowController`: único escritor del `FlowState`.
//! - `ControllerBuilder`: configura tiempos, store de eventos y sesión.
//! - `FlowCtx`: conduce un controlador con un `VirtualClock`.

pub mod builder;
pub mod controller;
pub mod flow_ctx;
mod state;

pub use builder::ControllerBuilder;
pub use controller::FlowController;
pub use flow_ctx::FlowCtx;
pub use state::FlowState;
