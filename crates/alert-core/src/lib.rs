//! alert-core: máquina de estados del recorrido guiado de una alerta.
//!
//! - `graph`: topología inmutable de pasos (lineal, decisión, terminal) y
//!   orden de presentación validado.
//! - `engine`: `FlowController`, transiciones en dos fases y `status`.
//! - `schedule`: efectos diferidos, `Timing` y relojes (real y virtual).
//! - `event` / `repo`: log append-only de la sesión y replay.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod graph;
pub mod hashing;
pub mod repo;
pub mod schedule;
pub mod step;

pub use engine::{ControllerBuilder, FlowController, FlowCtx, FlowState};
pub use errors::{GraphError, TransitionRejected};
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use graph::{GraphBuilder, StepGraph};
pub use repo::{FlowRepository, ReplayRepository};
pub use schedule::{Clock, Effect, PendingCommit, Timing, VirtualClock};
pub use step::{Branch, DecisionPath, InputKind, StepId, StepKind, StepNode, StepStatus};
