//! Reconstrucción del `FlowState` a partir del log de eventos.
//!
//! El replay es lineal: consume eventos en orden y aplica cada uno sobre el
//! estado. El texto escrito y no enviado no queda en el log, así que el
//! buffer sólo coincide con el vivo entre una petición y su commit.

use crate::engine::FlowState;
use crate::event::{FlowEvent, FlowEventKind};
use crate::graph::StepGraph;

/// Trait para reconstruir (`replay`) el estado de una sesión.
pub trait FlowRepository {
    fn load(&self, graph: &StepGraph, events: &[FlowEvent]) -> FlowState;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReplayRepository;

impl FlowRepository for ReplayRepository {
    fn load(&self, graph: &StepGraph, events: &[FlowEvent]) -> FlowState {
        let mut state = FlowState::new(graph.entry());
        for ev in events {
            match &ev.kind {
                FlowEventKind::SessionStarted { entry, .. } => state = FlowState::new(*entry),
                FlowEventKind::InputCaptured { text, .. } => state.set_input(text.clone()),
                FlowEventKind::TransitionRequested { .. } => state.begin_processing(),
                FlowEventKind::StepCompleted { step } => state.mark_completed(*step),
                FlowEventKind::StepSkipped { step } => state.mark_skipped(*step),
                FlowEventKind::StepEntered { step } => state.enter(*step),
                FlowEventKind::ResponseRevealed { .. } => state.apply_reveal(),
                FlowEventKind::FlowFinished { .. }
                | FlowEventKind::TransitionRejected { .. }
                | FlowEventKind::SessionTornDown { .. } => {}
            }
        }
        state
    }
}
