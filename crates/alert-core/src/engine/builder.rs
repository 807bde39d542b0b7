//! Builder para `FlowController`.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use alert_core::{FlowController, StepGraph, Timing};
//!
//! let graph = Arc::new(StepGraph::builder().linear(0, 1).terminal(1).build().expect("valid"));
//! let controller = FlowController::builder(graph).timing(Timing::immediate())
//!                                                .start(Duration::ZERO);
//! assert_eq!(controller.current_id().get(), 0);
//! ```

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::engine::FlowController;
use crate::event::{EventStore, InMemoryEventStore};
use crate::graph::StepGraph;
use crate::schedule::Timing;

#[derive(Debug)]
pub struct ControllerBuilder<E: EventStore> {
    graph: Arc<StepGraph>,
    timing: Timing,
    event_store: E,
    session_id: Option<Uuid>,
}

impl ControllerBuilder<InMemoryEventStore> {
    pub fn new(graph: Arc<StepGraph>) -> Self {
        Self { graph,
               timing: Timing::default(),
               event_store: InMemoryEventStore::default(),
               session_id: None }
    }
}

impl<E: EventStore> ControllerBuilder<E> {
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Sustituye la store de eventos.
    pub fn event_store<S: EventStore>(self, event_store: S) -> ControllerBuilder<S> {
        ControllerBuilder { graph: self.graph,
                            timing: self.timing,
                            event_store,
                            session_id: self.session_id }
    }

    /// Fija el id de sesión (por defecto uno aleatorio v4).
    pub fn session_id(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Crea el controlador en el paso de entrada y programa la primera
    /// revelación relativa a `now`.
    pub fn start(self, now: Duration) -> FlowController<E> {
        let session_id = self.session_id.unwrap_or_else(Uuid::new_v4);
        FlowController::start(self.graph, self.timing, self.event_store, session_id, now)
    }
}
