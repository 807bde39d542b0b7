//! Controlador del flujo.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::engine::{ControllerBuilder, FlowState};
use crate::errors::TransitionRejected;
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::graph::StepGraph;
use crate::schedule::{Effect, PendingCommit, Timeline, Timing};
use crate::step::{DecisionPath, StepId, StepKind, StepNode, StepStatus};

/// Máquina de estados sobre un `StepGraph`.
///
/// Las transiciones se piden con el instante actual (`now`, tiempo desde el
/// arranque de la sesión) y se aplican más tarde vía `tick`. Una petición
/// inválida devuelve `Err(TransitionRejected)` y no toca el estado.
#[derive(Debug)]
pub struct FlowController<E: EventStore = InMemoryEventStore> {
    graph: Arc<StepGraph>,
    timing: Timing,
    state: FlowState,
    timeline: Timeline,
    event_store: E,
    session_id: Uuid,
    torn_down: bool,
}

impl FlowController<InMemoryEventStore> {
    /// Builder con store de eventos en memoria.
    #[inline]
    pub fn builder(graph: Arc<StepGraph>) -> ControllerBuilder<InMemoryEventStore> {
        ControllerBuilder::new(graph)
    }
}

impl<E: EventStore> FlowController<E> {
    pub(crate) fn start(graph: Arc<StepGraph>, timing: Timing, event_store: E, session_id: Uuid, now: Duration) -> Self {
        let entry = graph.entry();
        let mut controller = Self { state: FlowState::new(entry),
                                    graph,
                                    timing,
                                    timeline: Timeline::new(),
                                    event_store,
                                    session_id,
                                    torn_down: false };
        let definition_hash = controller.graph.definition_hash().to_string();
        controller.record(FlowEventKind::SessionStarted { definition_hash, entry });
        controller.record(FlowEventKind::StepEntered { step: entry });
        controller.timeline.schedule(now + timing.initial_reveal, Effect::Reveal);
        log::info!("session {} started at step {}", session_id, entry);
        controller
    }

    pub fn graph(&self) -> &Arc<StepGraph> {
        &self.graph
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn current_id(&self) -> StepId {
        self.state.current()
    }

    /// Nodo del paso actual. Siempre existe: los commits sólo apuntan a
    /// sucesores validados al construir el grafo.
    pub fn current_step(&self) -> Option<&StepNode> {
        self.graph.get(self.state.current())
    }

    pub fn status(&self, id: StepId) -> StepStatus {
        self.state.status(id)
    }

    /// Estado de cada paso en orden de presentación.
    pub fn sidebar(&self) -> Vec<(StepId, StepStatus)> {
        self.graph
            .display_order()
            .iter()
            .map(|id| (*id, self.state.status(*id)))
            .collect()
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing()
    }

    pub fn response_visible(&self) -> bool {
        self.state.response_visible()
    }

    pub fn input(&self) -> &str {
        self.state.input()
    }

    pub fn is_final(&self) -> bool {
        self.current_step().is_some_and(|n| n.kind.is_terminal())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// El paso actual pide texto y la entrada no está bloqueada.
    pub fn accepts_input(&self) -> bool {
        !self.torn_down && !self.state.is_processing() && self.current_step().is_some_and(|n| n.requires_input.is_some())
    }

    /// Reemplaza el buffer. Se ignora si el paso no admite texto o hay una
    /// transición en curso.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.state.set_input(text.into());
        true
    }

    /// Añade una línea al buffer.
    pub fn push_input(&mut self, text: &str) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.state.push_input(text);
        true
    }

    /// Comprueba si `advance_linear` sería aceptada ahora, sin efectos.
    pub fn check_linear(&self) -> Result<PendingCommit, TransitionRejected> {
        self.check_idle()?;
        let node = self.current_step().ok_or(TransitionRejected::Terminal)?;
        let to = match node.kind {
            StepKind::Linear { next } => next,
            StepKind::Decision { .. } => return Err(TransitionRejected::NotLinear),
            StepKind::Terminal => return Err(TransitionRejected::Terminal),
        };
        if node.requires_input.is_some() && self.state.input().trim().is_empty() {
            return Err(TransitionRejected::InputRequired);
        }
        Ok(PendingCommit { from: node.id,
                           to,
                           skipped: None })
    }

    /// Comprueba si `advance_by_decision(path)` sería aceptada ahora.
    pub fn check_decision(&self, path: DecisionPath) -> Result<PendingCommit, TransitionRejected> {
        self.check_idle()?;
        let node = self.current_step().ok_or(TransitionRejected::NotDecision)?;
        match (node.kind.branch(path), node.kind.branch(path.other())) {
            (Some(to), Some(skipped)) => Ok(PendingCommit { from: node.id,
                                                            to,
                                                            skipped: Some(skipped) }),
            _ => Err(TransitionRejected::NotDecision),
        }
    }

    fn check_idle(&self) -> Result<(), TransitionRejected> {
        if self.torn_down {
            return Err(TransitionRejected::TornDown);
        }
        if self.state.is_processing() {
            return Err(TransitionRejected::Processing);
        }
        Ok(())
    }

    /// Avanza al único sucesor del paso actual.
    pub fn advance_linear(&mut self, now: Duration) -> Result<PendingCommit, TransitionRejected> {
        let commit = self.check_linear().map_err(|reason| self.reject(reason))?;
        let captured = self.current_step().and_then(|n| n.requires_input);
        if let Some(kind) = captured {
            let text = self.state.input().to_string();
            self.record(FlowEventKind::InputCaptured { step: commit.from, kind, text });
        }
        self.record(FlowEventKind::TransitionRequested { from: commit.from,
                                                         to: commit.to,
                                                         path: None });
        self.schedule(commit, now);
        Ok(commit)
    }

    /// Avanza por la rama `path` del paso de decisión actual y marca como
    /// omitido el primer paso de la otra rama.
    pub fn advance_by_decision(&mut self, path: DecisionPath, now: Duration) -> Result<PendingCommit, TransitionRejected> {
        let commit = self.check_decision(path).map_err(|reason| self.reject(reason))?;
        self.record(FlowEventKind::TransitionRequested { from: commit.from,
                                                         to: commit.to,
                                                         path: Some(path) });
        self.schedule(commit, now);
        Ok(commit)
    }

    fn reject(&mut self, reason: TransitionRejected) -> TransitionRejected {
        let step = self.state.current();
        log::debug!("transition rejected at step {}: {}", step, reason);
        self.record(FlowEventKind::TransitionRejected { step, reason });
        reason
    }

    fn schedule(&mut self, commit: PendingCommit, now: Duration) {
        // Sólo puede quedar pendiente la revelación inicial; la nueva la reemplaza.
        self.timeline.cancel_all();
        self.state.begin_processing();
        let commit_at = now + self.timing.processing;
        self.timeline.schedule(commit_at, Effect::Commit(commit));
        self.timeline.schedule(commit_at + self.timing.reveal, Effect::Reveal);
        log::debug!("transition {} -> {} scheduled at {:?}", commit.from, commit.to, commit_at);
    }

    /// Aplica, en orden, todos los efectos vencidos en `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<Effect> {
        let mut applied = Vec::new();
        while let Some(scheduled) = self.timeline.pop_due(now) {
            self.apply(scheduled.effect);
            applied.push(scheduled.effect);
        }
        applied
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Commit(commit) => {
                self.state.apply_commit(&commit);
                self.record(FlowEventKind::StepCompleted { step: commit.from });
                if let Some(step) = commit.skipped {
                    self.record(FlowEventKind::StepSkipped { step });
                }
                self.record(FlowEventKind::StepEntered { step: commit.to });
                log::debug!("entered step {}", commit.to);
                if self.is_final() {
                    self.record(FlowEventKind::FlowFinished { step: commit.to });
                    log::info!("session {} finished at step {}", self.session_id, commit.to);
                }
            }
            Effect::Reveal => {
                self.state.apply_reveal();
                let step = self.state.current();
                self.record(FlowEventKind::ResponseRevealed { step });
            }
        }
    }

    /// Próximo vencimiento pendiente.
    pub fn next_due(&self) -> Option<Duration> {
        self.timeline.next_due()
    }

    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    /// Cierra la sesión: descarta efectos pendientes y bloquea nuevas
    /// transiciones. Idempotente.
    pub fn teardown(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        let cancelled = self.timeline.cancel_all();
        if cancelled > 0 {
            log::warn!("session {} torn down with {} pending effect(s)", self.session_id, cancelled);
        }
        self.record(FlowEventKind::SessionTornDown { cancelled });
        cancelled
    }

    pub fn events(&self) -> Vec<FlowEvent> {
        self.event_store.list(self.session_id)
    }

    fn record(&mut self, kind: FlowEventKind) {
        self.event_store.append_kind(self.session_id, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::InputKind;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn graph() -> Arc<StepGraph> {
        Arc::new(StepGraph::builder().linear(0, 1)
                                     .decision(1, 2, 3)
                                     .linear(2, 4)
                                     .linear(3, 5)
                                     .requires_input(3, InputKind::Justification)
                                     .terminal(4)
                                     .terminal(5)
                                     .build()
                                     .expect("valid graph"))
    }

    #[test]
    fn initial_reveal_fires_once_after_delay() {
        let mut c = FlowController::builder(graph()).start(ms(0));
        assert!(!c.response_visible());
        assert!(c.tick(ms(499)).is_empty());
        assert_eq!(c.tick(ms(500)), vec![Effect::Reveal]);
        assert!(c.response_visible());
        assert!(c.is_idle());
    }

    #[test]
    fn linear_transition_runs_in_two_phases() {
        let mut c = FlowController::builder(graph()).start(ms(0));
        c.tick(ms(500));

        let commit = c.advance_linear(ms(600)).expect("accepted");
        assert_eq!(commit.to, StepId(1));
        assert!(c.is_processing());
        assert!(!c.response_visible());
        assert_eq!(c.current_id(), StepId(0));

        assert!(c.tick(ms(1599)).is_empty());
        assert!(matches!(c.tick(ms(1600)).as_slice(), [Effect::Commit(_)]));
        assert_eq!(c.current_id(), StepId(1));
        assert_eq!(c.status(StepId(0)), StepStatus::Completed);
        assert!(c.is_processing());

        assert!(c.tick(ms(1899)).is_empty());
        assert_eq!(c.tick(ms(1900)), vec![Effect::Reveal]);
        assert!(!c.is_processing());
        assert!(c.response_visible());
    }

    #[test]
    fn requests_while_processing_are_rejected_without_side_effects() {
        let mut c = FlowController::builder(graph()).start(ms(0));
        c.advance_linear(ms(0)).expect("accepted");
        let before = c.state().clone();
        assert_eq!(c.advance_linear(ms(10)), Err(TransitionRejected::Processing));
        assert_eq!(c.state(), &before);
        assert_eq!(c.next_due(), Some(ms(1000)));
    }

    #[test]
    fn early_action_supersedes_the_initial_reveal() {
        let mut c = FlowController::builder(graph()).start(ms(0));
        c.advance_linear(ms(100)).expect("accepted");
        // the initial reveal at 500ms must not release the latch
        assert!(c.tick(ms(500)).is_empty());
        assert!(c.is_processing());
        c.tick(ms(1400));
        assert!(!c.is_processing());
        assert_eq!(c.current_id(), StepId(1));
    }

    #[test]
    fn decision_marks_other_branch_as_skipped() {
        let mut c = FlowController::builder(graph()).timing(Timing::immediate()).start(ms(0));
        c.tick(ms(0));
        c.advance_linear(ms(0)).expect("to decision");
        c.tick(ms(0));
        assert_eq!(c.advance_linear(ms(0)), Err(TransitionRejected::NotLinear));
        let commit = c.advance_by_decision(DecisionPath::FalsePositive, ms(0)).expect("accepted");
        assert_eq!(commit.skipped, Some(StepId(2)));
        c.tick(ms(0));
        assert_eq!(c.current_id(), StepId(3));
        assert_eq!(c.status(StepId(2)), StepStatus::Skipped);
    }

    #[test]
    fn input_gate_and_buffer_lifecycle() {
        let mut c = FlowController::builder(graph()).timing(Timing::immediate()).start(ms(0));
        assert!(!c.set_input("ignored"), "step 0 takes no input");
        c.tick(ms(0));
        assert_eq!(c.advance_by_decision(DecisionPath::TruePositive, ms(0)),
                   Err(TransitionRejected::NotDecision));
        assert_eq!(c.current_id(), StepId(0));
        assert!(!c.is_processing());
        c.advance_linear(ms(0)).expect("to decision");
        c.tick(ms(0));
        c.advance_by_decision(DecisionPath::FalsePositive, ms(0)).expect("to 3");
        c.tick(ms(0));

        assert_eq!(c.advance_linear(ms(0)), Err(TransitionRejected::InputRequired));
        assert!(c.set_input("   "));
        assert_eq!(c.advance_linear(ms(0)), Err(TransitionRejected::InputRequired));
        assert!(c.set_input("consistente con el historial"));
        c.advance_linear(ms(0)).expect("accepted");
        assert!(!c.push_input("late"), "input is locked while processing");
        c.tick(ms(0));
        assert!(c.input().is_empty());
        assert!(c.is_final());
        assert_eq!(c.advance_linear(ms(0)), Err(TransitionRejected::Terminal));
        assert_eq!(c.advance_by_decision(DecisionPath::TruePositive, ms(0)),
                   Err(TransitionRejected::NotDecision));
    }

    #[test]
    fn teardown_cancels_pending_effects() {
        let mut c = FlowController::builder(graph()).start(ms(0));
        c.advance_linear(ms(0)).expect("accepted");
        assert_eq!(c.teardown(), 2);
        assert_eq!(c.teardown(), 0);
        assert!(c.tick(ms(10_000)).is_empty());
        assert_eq!(c.current_id(), StepId(0));
        assert_eq!(c.advance_linear(ms(10_000)), Err(TransitionRejected::TornDown));
        assert!(matches!(c.events().last().map(|e| &e.kind),
                         Some(FlowEventKind::TransitionRejected { reason: TransitionRejected::TornDown, .. })));
    }
}
