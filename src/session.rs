//! Sesión de terminal: lee líneas, conduce el controlador y redibuja.
//!
//! Todo corre en un único hilo. Los temporizadores del controlador son los
//! únicos puntos de espera además de la entrada estándar.

use std::io::Write;
use std::time::Duration;

use alert_core::{Clock, DecisionPath, FlowController, FlowEvent, StepId, TransitionRejected, VirtualClock};
use alert_domain::Script;
use tokio::io::{AsyncBufRead, Lines};
use tokio::time::Instant;

use crate::errors::AppError;
use crate::render::{self, StepControls, Style};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Acción del usuario ya interpretada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Decide(DecisionPath),
    /// Línea de texto para el buffer.
    Text(String),
    Submit,
    Proceed,
    Redraw,
    Quit,
}

/// Interpreta una línea según los controles del paso actual. `None` si la
/// línea no significa nada aquí.
pub fn parse_action(line: &str, controls: &StepControls) -> Option<UserAction> {
    let trimmed = line.trim();
    match trimmed {
        ":q" => return Some(UserAction::Quit),
        ":r" => return Some(UserAction::Redraw),
        _ => {}
    }
    match controls {
        StepControls::Decision { .. } => match trimmed.to_lowercase().as_str() {
            "1" | "vp" => Some(UserAction::Decide(DecisionPath::TruePositive)),
            "2" | "fp" => Some(UserAction::Decide(DecisionPath::FalsePositive)),
            _ => None,
        },
        StepControls::TextEntry { .. } if trimmed.is_empty() => Some(UserAction::Submit),
        StepControls::TextEntry { .. } => Some(UserAction::Text(line.trim_end().to_string())),
        StepControls::Proceed(_) if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("e") => Some(UserAction::Proceed),
        StepControls::Proceed(_) | StepControls::None => None,
    }
}

/// Acción que un recorrido guionado tomaría ahora.
pub fn scripted_action(controls: &StepControls, path: DecisionPath, text: &str) -> Option<UserAction> {
    match controls {
        StepControls::Decision { .. } => Some(UserAction::Decide(path)),
        StepControls::TextEntry { buffer, .. } if buffer.is_empty() => Some(UserAction::Text(text.to_string())),
        StepControls::TextEntry { .. } => Some(UserAction::Submit),
        StepControls::Proceed(_) => Some(UserAction::Proceed),
        StepControls::None => None,
    }
}

fn hint(controls: &StepControls) -> &'static str {
    match controls {
        StepControls::Decision { .. } => "1/vp verdadero positivo · 2/fp falso positivo · :q salir",
        StepControls::TextEntry { .. } => "escriba y pulse Enter · línea vacía envía · :q salir",
        StepControls::Proceed(_) => "Enter o e ejecuta · :q salir",
        StepControls::None => ":q salir",
    }
}

/// Reloj de la sesión.
#[derive(Debug)]
pub enum SessionClock {
    /// Tiempo del runtime de tokio (respeta el tiempo pausado en tests).
    Runtime(Instant),
    /// Sin esperas reales.
    Virtual(VirtualClock),
}

impl SessionClock {
    pub fn runtime() -> Self {
        SessionClock::Runtime(Instant::now())
    }

    pub fn fast() -> Self {
        SessionClock::Virtual(VirtualClock::new())
    }

    /// Espera (o salta) hasta `due`.
    async fn wait_until(&self, due: Duration) {
        match self {
            SessionClock::Runtime(started) => tokio::time::sleep_until(*started + due).await,
            SessionClock::Virtual(clock) => {
                clock.advance_to(due);
            }
        }
    }
}

impl Clock for SessionClock {
    fn now(&self) -> Duration {
        match self {
            SessionClock::Runtime(started) => started.elapsed(),
            SessionClock::Virtual(clock) => clock.now(),
        }
    }
}

/// Resumen al cerrar la sesión.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub last_step: StepId,
    pub finished: bool,
    /// Efectos descartados al cerrar.
    pub cancelled: usize,
    pub events: Vec<FlowEvent>,
}

enum Wake {
    Line(Option<String>),
    Deadline,
    Interrupt,
}

pub struct Session<W: Write> {
    script: Script,
    controller: FlowController,
    clock: SessionClock,
    out: W,
    style: Style,
    clear: bool,
}

impl<W: Write> Session<W> {
    pub fn new(script: Script, controller: FlowController, clock: SessionClock, out: W, style: Style) -> Self {
        let clear = style.color;
        Self { script,
               controller,
               clock,
               out,
               style,
               clear }
    }

    pub fn controller(&self) -> &FlowController {
        &self.controller
    }

    pub fn controls(&self) -> StepControls {
        render::controls_for(&self.script, &self.controller)
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Dibuja la pantalla completa.
    pub fn draw(&mut self) -> Result<(), AppError> {
        let controls = self.controls();
        let screen = render::screen(&self.script, &self.controller, self.style);
        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        write!(self.out, "{screen}")?;
        writeln!(self.out, "{}", self.style.paint(render::DIM, hint(&controls)))?;
        self.out.flush()?;
        Ok(())
    }

    /// Aplica una acción. Devuelve `false` si la sesión debe terminar.
    pub fn apply(&mut self, action: UserAction) -> Result<bool, AppError> {
        let now = self.now();
        let result: Result<(), TransitionRejected> = match action {
            UserAction::Quit => return Ok(false),
            UserAction::Redraw => Ok(()),
            UserAction::Text(text) => {
                self.controller.push_input(&text);
                Ok(())
            }
            UserAction::Decide(path) => self.controller.advance_by_decision(path, now).map(|_| ()),
            UserAction::Submit | UserAction::Proceed => self.controller.advance_linear(now).map(|_| ()),
        };
        if let Err(reason) = result {
            log::debug!("action ignored: {reason}");
        }
        self.draw()?;
        Ok(true)
    }

    /// Procesa una línea de entrada. Mientras hay una transición en curso
    /// sólo se atienden `:q` y `:r`.
    pub fn handle_line(&mut self, line: &str) -> Result<bool, AppError> {
        let action = parse_action(line, &self.controls());
        if self.controller.is_processing() && !matches!(action, Some(UserAction::Quit | UserAction::Redraw)) {
            log::debug!("line ignored while processing");
            return Ok(true);
        }
        match action {
            Some(action) => self.apply(action),
            None => {
                log::debug!("unrecognized input {line:?}");
                Ok(true)
            }
        }
    }

    /// Aplica los efectos vencidos y redibuja si hubo alguno.
    pub fn tick(&mut self) -> Result<(), AppError> {
        let now = self.now();
        if !self.controller.tick(now).is_empty() {
            self.draw()?;
        }
        Ok(())
    }

    /// Espera hasta que no quede nada pendiente.
    pub async fn settle(&mut self) -> Result<(), AppError> {
        while let Some(due) = self.controller.next_due() {
            self.clock.wait_until(due).await;
            self.tick()?;
        }
        Ok(())
    }

    fn finished(&self) -> bool {
        self.controller.is_final() && self.controller.is_idle()
    }

    /// Bucle interactivo sobre `lines` hasta `:q`, EOF, Ctrl-C o el final
    /// del guion.
    pub async fn run<R>(&mut self, mut lines: Lines<R>) -> Result<SessionReport, AppError>
        where R: AsyncBufRead + Unpin
    {
        self.draw()?;
        while !self.finished() {
            let deadline = self.controller.next_due();
            let wake = {
                let clock = &self.clock;
                let timer = async move {
                    match deadline {
                        Some(due) => clock.wait_until(due).await,
                        None => std::future::pending::<()>().await,
                    }
                };
                tokio::select! {
                    line = lines.next_line() => Wake::Line(line?),
                    _ = timer => Wake::Deadline,
                    _ = tokio::signal::ctrl_c() => Wake::Interrupt,
                }
            };
            match wake {
                Wake::Line(Some(line)) => {
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                Wake::Line(None) => {
                    log::debug!("input closed");
                    break;
                }
                Wake::Deadline => self.tick()?,
                Wake::Interrupt => {
                    log::info!("interrupted");
                    break;
                }
            }
        }
        Ok(self.close())
    }

    /// Recorrido no interactivo por la rama `path`, escribiendo `text` en
    /// los pasos que piden entrada.
    pub async fn replay(&mut self, path: DecisionPath, text: &str) -> Result<SessionReport, AppError> {
        self.settle().await?;
        self.draw()?;
        while let Some(action) = scripted_action(&self.controls(), path, text) {
            let before = self.controller.state().clone();
            self.apply(action)?;
            self.settle().await?;
            if self.controller.state() == &before {
                // el controlador rechaza la acción: no insistir
                log::warn!("scripted walk stalled at step {}", self.controller.current_id());
                break;
            }
        }
        Ok(self.close())
    }

    /// Cierra la sesión y resume lo ocurrido.
    pub fn close(&mut self) -> SessionReport {
        let cancelled = self.controller.teardown();
        SessionReport { last_step: self.controller.current_id(),
                        finished: self.controller.is_final(),
                        cancelled,
                        events: self.controller.events() }
    }
}
