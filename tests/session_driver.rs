use std::time::Duration;

use alert_core::{DecisionPath, FlowController, FlowEventKind, StepId, StepStatus, TransitionRejected};
use alert_domain::Script;
use alertflow_rust::render::Style;
use alertflow_rust::{Session, SessionClock};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::time::{sleep, Instant};

fn session(clock: SessionClock) -> Session<Vec<u8>> {
    let script = Script::investigation().expect("script");
    let controller = FlowController::builder(script.graph().clone()).start(Duration::ZERO);
    Session::new(script, controller, clock, Vec::new(), Style::PLAIN)
}

/// Escribe cada línea tras esperar su retardo.
fn feed(lines: Vec<(u64, &'static str)>) -> DuplexStream {
    let (mut tx, rx) = tokio::io::duplex(1024);
    tokio::spawn(async move {
        for (delay_ms, line) in lines {
            sleep(Duration::from_millis(delay_ms)).await;
            if tx.write_all(format!("{line}\n").as_bytes()).await.is_err() {
                return;
            }
        }
    });
    rx
}

#[tokio::test(start_paused = true)]
async fn scripted_false_positive_walk_honours_the_delays() {
    let started = Instant::now();
    let mut s = session(SessionClock::runtime());
    let report = s.replay(DecisionPath::FalsePositive, "consistente con el historial").await.expect("replay");

    assert!(report.finished);
    assert_eq!(report.last_step, StepId(8));
    assert_eq!(report.cancelled, 0);
    // 500 ms de revelación inicial y 6 transiciones de 1300 ms
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(8300), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(8400), "elapsed {elapsed:?}");
    assert_eq!(s.controller().status(StepId(5)), StepStatus::Skipped);

    let captured = report.events.iter().find_map(|e| match &e.kind {
                                           FlowEventKind::InputCaptured { step, text, .. } => Some((*step, text.clone())),
                                           _ => None,
                                       });
    assert_eq!(captured, Some((StepId(6), "consistente con el historial".to_string())));
}

#[tokio::test]
async fn fast_true_positive_walk_does_not_sleep() {
    let mut s = session(SessionClock::fast());
    let report = s.replay(DecisionPath::TruePositive, "patrón de estructuración").await.expect("replay");
    assert!(report.finished);
    assert_eq!(report.last_step, StepId(9));
    assert_eq!(s.controller().status(StepId(6)), StepStatus::Skipped);
    assert_eq!(s.controller().status(StepId(8)), StepStatus::Pending);

    let out = String::from_utf8(s.output().clone()).expect("utf8");
    assert!(out.contains("Fin: ROS Enviado"));
    assert!(out.contains("Transcripción completada"));
}

#[tokio::test]
async fn blank_scripted_text_stops_at_the_input_step() {
    let mut s = session(SessionClock::fast());
    let report = s.replay(DecisionPath::FalsePositive, "   ").await.expect("replay");

    assert!(!report.finished);
    assert_eq!(report.last_step, StepId(6));
    assert_eq!(s.controller().input(), "   ");
    assert!(report.events.iter().any(|e| matches!(e.kind,
                                                  FlowEventKind::TransitionRejected { step: StepId(6),
                                                                                      reason: TransitionRejected::InputRequired })));
}

#[tokio::test(start_paused = true)]
async fn interactive_run_reaches_the_closing_step() {
    let rx = feed(vec![(0, ""), (1500, ""), (1500, "e"), (1500, ""), (1500, "fp"), (1500, "sin riesgo"), (1500, "")]);
    let mut s = session(SessionClock::runtime());
    let report = s.run(BufReader::new(rx).lines()).await.expect("run");

    assert!(report.finished);
    assert_eq!(report.last_step, StepId(8));
    assert!(report.events.iter().any(|e| matches!(e.kind, FlowEventKind::FlowFinished { step: StepId(8) })));
}

#[tokio::test(start_paused = true)]
async fn lines_during_processing_are_ignored() {
    let rx = feed(vec![(0, ""), (100, ""), (2000, ":q")]);
    let mut s = session(SessionClock::runtime());
    let report = s.run(BufReader::new(rx).lines()).await.expect("run");

    assert!(!report.finished);
    assert_eq!(report.last_step, StepId(1));
    assert_eq!(report.cancelled, 0);
    let requested = report.events.iter().filter(|e| matches!(e.kind, FlowEventKind::TransitionRequested { .. })).count();
    assert_eq!(requested, 1);
}

#[tokio::test(start_paused = true)]
async fn quit_is_honoured_during_a_transition() {
    let rx = feed(vec![(0, ""), (100, ":q")]);
    let mut s = session(SessionClock::runtime());
    let report = s.run(BufReader::new(rx).lines()).await.expect("run");

    assert_eq!(report.last_step, StepId(0));
    assert_eq!(report.cancelled, 2);
    assert!(s.controller().is_torn_down());
}

#[tokio::test(start_paused = true)]
async fn closed_input_tears_down_pending_effects() {
    let rx = feed(vec![(0, "")]);
    let mut s = session(SessionClock::runtime());
    let report = s.run(BufReader::new(rx).lines()).await.expect("run");

    assert_eq!(report.cancelled, 2);
    assert_eq!(report.last_step, StepId(0));
    assert!(s.controller().is_torn_down());
    assert!(matches!(report.events.last().map(|e| &e.kind), Some(FlowEventKind::SessionTornDown { cancelled: 2 })));
}
