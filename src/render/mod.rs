//! Render en texto de la pantalla de investigación.
//!
//! Todo es puro: recibe el guion y el controlador y devuelve `String`.
//! La sesión decide cuándo escribirlo.

pub mod controls;
pub mod panel;
pub mod sidebar;

use alert_core::{EventStore, FlowController};
use alert_domain::{labels, Script};

pub use controls::{controls_for, Control, StepControls};

const RESET: &str = "\x1b[0m";
pub(crate) const BOLD: &str = "\x1b[1m";
pub(crate) const DIM: &str = "\x1b[2m";
pub(crate) const STRIKE: &str = "\x1b[9m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const BLUE: &str = "\x1b[34m";
pub(crate) const CYAN: &str = "\x1b[36m";

/// Estilo ANSI activable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub const PLAIN: Style = Style { color: false };

    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Envuelve `text` con `code` si el color está activo.
    pub fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

pub fn header(style: Style) -> String {
    let mut out = String::new();
    out.push_str(&style.paint(BOLD, labels::HEADER_TITLE));
    out.push('\n');
    out.push_str(&style.paint(DIM, labels::HEADER_SUBTITLE));
    out.push('\n');
    out
}

/// Pantalla completa: cabecera, barra lateral y panel del paso actual.
pub fn screen<E: EventStore>(script: &Script, controller: &FlowController<E>, style: Style) -> String {
    let mut out = header(style);
    out.push('\n');
    out.push_str(&sidebar::render(script, controller, style));
    out.push('\n');
    out.push_str(&panel::render(script, controller, style));
    out
}
