//! Contexto de conducción con reloj virtual.

use crate::engine::FlowController;
use crate::errors::TransitionRejected;
use crate::event::EventStore;
use crate::schedule::{Clock, PendingCommit, VirtualClock};
use crate::step::{DecisionPath, StepId};

/// Une un controlador y un `VirtualClock` para recorrer el guion sin
/// esperar temporizadores reales. Cada acción aceptada se asienta
/// (`settle`) antes de devolver.
pub struct FlowCtx<'a, E: EventStore> {
    pub controller: &'a mut FlowController<E>,
    pub clock: &'a VirtualClock,
}

impl<'a, E: EventStore> FlowCtx<'a, E> {
    #[inline]
    pub fn new(controller: &'a mut FlowController<E>, clock: &'a VirtualClock) -> Self {
        Self { controller, clock }
    }

    /// Avanza el reloj hasta agotar la línea de tiempo.
    pub fn settle(&mut self) {
        while let Some(due) = self.controller.next_due() {
            let now = self.clock.advance_to(due);
            self.controller.tick(now);
        }
    }

    /// `advance_linear` y asentar.
    pub fn proceed(&mut self) -> Result<PendingCommit, TransitionRejected> {
        let commit = self.controller.advance_linear(self.clock.now())?;
        self.settle();
        Ok(commit)
    }

    /// `advance_by_decision` y asentar.
    pub fn choose(&mut self, path: DecisionPath) -> Result<PendingCommit, TransitionRejected> {
        let commit = self.controller.advance_by_decision(path, self.clock.now())?;
        self.settle();
        Ok(commit)
    }

    /// Escribe `text` en el buffer y avanza.
    pub fn submit(&mut self, text: &str) -> Result<PendingCommit, TransitionRejected> {
        self.controller.set_input(text);
        self.proceed()
    }

    /// Avanza por pasos lineales sin texto hasta llegar a una decisión, un
    /// paso con entrada o un terminal. Devuelve los ids recorridos.
    pub fn run_linear(&mut self) -> Vec<StepId> {
        self.settle();
        let mut visited = Vec::new();
        while let Some(node) = self.controller.current_step() {
            if node.requires_input.is_some() || node.next().is_none() {
                break;
            }
            match self.proceed() {
                Ok(commit) => visited.push(commit.to),
                Err(_) => break,
            }
        }
        visited
    }
}
