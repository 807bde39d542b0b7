//! Controles del área de comandos.

use alert_core::{DecisionPath, EventStore, FlowController, StepKind};
use alert_domain::{labels, InputPrompt, Script};

/// Un botón de comando.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub enabled: bool,
}

/// Lo que el área de comandos ofrece en el paso actual. Siempre una sola
/// de las cuatro formas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepControls {
    /// Paso de decisión: principal (verdadero positivo) y secundario.
    Decision { primary: Control, secondary: Control },
    /// Paso con entrada de texto.
    TextEntry {
        prompt: InputPrompt,
        buffer: String,
        submit: Control,
    },
    /// Paso lineal sin entrada.
    Proceed(Control),
    /// Paso terminal.
    None,
}

impl StepControls {
    /// Algún control está habilitado.
    pub fn any_enabled(&self) -> bool {
        match self {
            StepControls::Decision { primary, secondary } => primary.enabled || secondary.enabled,
            StepControls::TextEntry { submit, .. } => submit.enabled,
            StepControls::Proceed(control) => control.enabled,
            StepControls::None => false,
        }
    }
}

/// Controles del paso actual. No modifica nada.
pub fn controls_for<E: EventStore>(script: &Script, controller: &FlowController<E>) -> StepControls {
    let Some((node, content)) = script.step(controller.current_id()) else {
        return StepControls::None;
    };
    match node.kind {
        StepKind::Terminal => StepControls::None,
        StepKind::Decision { .. } => match content.decision.as_ref() {
            Some(decision) => {
                let primary = controller.check_decision(DecisionPath::TruePositive).is_ok();
                let secondary = controller.check_decision(DecisionPath::FalsePositive).is_ok();
                StepControls::Decision { primary: Control { label: decision.true_positive,
                                                            enabled: primary },
                                         secondary: Control { label: decision.false_positive,
                                                              enabled: secondary } }
            }
            None => StepControls::None,
        },
        StepKind::Linear { .. } => {
            let enabled = controller.check_linear().is_ok();
            match node.requires_input {
                Some(kind) => {
                    let prompt = labels::input_prompt(kind);
                    StepControls::TextEntry { submit: Control { label: prompt.submit_label,
                                                                enabled },
                                              prompt,
                                              buffer: controller.input().to_string() }
                }
                None => StepControls::Proceed(Control { label: content.command,
                                                        enabled }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_core::{DecisionPath, FlowCtx, Timing, VirtualClock};
    use std::time::Duration;

    #[test]
    fn proceed_is_disabled_while_processing() {
        let script = Script::investigation().expect("script");
        let mut c = FlowController::builder(script.graph().clone()).start(Duration::ZERO);
        assert_eq!(controls_for(&script, &c),
                   StepControls::Proceed(Control { label: "Asistente Cumplimiento, [Abre Alerta] 2025-452.",
                                                   enabled: true }));
        c.advance_linear(Duration::ZERO).expect("accepted");
        assert!(!controls_for(&script, &c).any_enabled());
    }

    #[test]
    fn torn_down_session_disables_every_control() {
        let script = Script::investigation().expect("script");
        let mut c = FlowController::builder(script.graph().clone()).start(Duration::ZERO);
        c.teardown();
        assert!(matches!(controls_for(&script, &c), StepControls::Proceed(_)));
        assert!(!controls_for(&script, &c).any_enabled());
    }

    #[test]
    fn submit_follows_the_buffer() {
        let script = Script::investigation().expect("script");
        let clock = VirtualClock::new();
        let mut c = FlowController::builder(script.graph().clone()).timing(Timing::immediate())
                                                                   .start(Duration::ZERO);
        {
            let mut ctx = FlowCtx::new(&mut c, &clock);
            ctx.run_linear();
            assert!(matches!(controls_for(&script, ctx.controller), StepControls::Decision { .. }));
            ctx.choose(DecisionPath::FalsePositive).expect("fp");
        }
        match controls_for(&script, &c) {
            StepControls::TextEntry { submit, buffer, prompt } => {
                assert!(!submit.enabled);
                assert!(buffer.is_empty());
                assert_eq!(submit.label, "Enviar Justificación y Cerrar");
                assert!(!prompt.microphone);
            }
            other => panic!("unexpected controls: {other:?}"),
        }
        c.set_input("sin riesgo");
        assert!(controls_for(&script, &c).any_enabled());
    }
}
