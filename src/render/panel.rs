//! Panel del paso actual.

use alert_core::{EventStore, FlowController};
use alert_domain::{labels, FindingIcon, ResponseBlock, Script, Tone};

use super::controls::{controls_for, Control, StepControls};
use super::{Style, BLUE, BOLD, CYAN, DIM, GREEN, RED, YELLOW};

const PROCESSING_HINT: &str = "Procesando...";

fn control_line(style: Style, key: &str, control: &Control) -> String {
    let tag = format!("[{}]", labels::EXECUTE_TAG);
    if control.enabled {
        format!("  {} {}  {}\n", style.paint(BOLD, key), control.label, style.paint(CYAN, &tag))
    } else {
        format!("  {}\n", style.paint(DIM, &format!("{key} {}  {tag}", control.label)))
    }
}

fn render_controls(controls: &StepControls, style: Style) -> String {
    let mut out = String::new();
    match controls {
        StepControls::Decision { primary, secondary } => {
            out.push_str(&control_line(style, "[1]", primary));
            out.push_str(&control_line(style, "[2]", secondary));
        }
        StepControls::TextEntry { prompt, buffer, submit } => {
            let mic = if prompt.microphone { style.paint(RED, "● ") } else { String::new() };
            if buffer.is_empty() {
                out.push_str(&format!("  {mic}{}\n", style.paint(DIM, prompt.placeholder)));
            } else {
                for line in buffer.lines() {
                    out.push_str(&format!("  {mic}{line}\n"));
                }
            }
            out.push_str(&control_line(style, "[↵]", submit));
        }
        StepControls::Proceed(control) => out.push_str(&control_line(style, "[↵]", control)),
        StepControls::None => {}
    }
    out
}

fn render_block(block: &ResponseBlock, style: Style) -> String {
    match block {
        ResponseBlock::Paragraph { text } => format!("{text}\n"),
        ResponseBlock::Heading { text } => format!("{}\n", style.paint(BOLD, text)),
        ResponseBlock::Success { text } => format!("{}\n", style.paint(GREEN, &format!("✓ {text}"))),
        ResponseBlock::Bullets { items } => {
            let mut out = String::new();
            for item in items {
                let code = match item.tone {
                    Tone::Neutral => BOLD,
                    Tone::Positive => GREEN,
                    Tone::Warning => YELLOW,
                };
                let label = item.label.map(|l| format!("{} ", style.paint(code, l))).unwrap_or_default();
                let emphasis = item.emphasis.map(|e| format!(" {}", style.paint(BOLD, e))).unwrap_or_default();
                out.push_str(&format!("  • {label}{}{emphasis}\n", item.text));
            }
            out
        }
        ResponseBlock::Finding { icon, title, body } => {
            let icon = match icon {
                FindingIcon::Search => "🔍",
                FindingIcon::Document => "📄",
            };
            format!("{icon} {}\n   {body}\n", style.paint(BOLD, title))
        }
    }
}

/// Descripción, área de comandos y, si está visible, la respuesta.
pub fn render<E: EventStore>(script: &Script, controller: &FlowController<E>, style: Style) -> String {
    let Some(content) = script.content(controller.current_id()) else {
        return String::new();
    };
    let mut out = String::new();
    out.push_str(&style.paint(BOLD, content.title));
    out.push('\n');
    out.push_str(&style.paint(BLUE, labels::ROLE_LABEL));
    out.push('\n');
    out.push_str(content.description);
    out.push_str("\n\n");

    let controls = controls_for(script, controller);
    if controls != StepControls::None {
        out.push_str(&style.paint(DIM, &labels::COMMAND_AREA_LABEL.to_uppercase()));
        out.push('\n');
        out.push_str(&render_controls(&controls, style));
        out.push('\n');
    }

    if controller.response_visible() {
        out.push_str(&style.paint(CYAN, labels::RESPONSE_HEADING));
        out.push('\n');
        for block in &content.response.blocks {
            out.push_str(&render_block(block, style));
        }
    } else if controller.is_processing() {
        out.push_str(&style.paint(DIM, PROCESSING_HINT));
        out.push('\n');
    }
    out
}
