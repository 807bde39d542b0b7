//! Barra lateral de pasos.

use alert_core::{EventStore, FlowController, StepStatus};
use alert_domain::{labels, Script};

use super::{Style, BLUE, BOLD, DIM, GREEN, STRIKE};

const BRANCH_ICON: &str = "⑂";
const CHECK_ICON: &str = "✓";
const CONNECTOR: &str = "│";

/// Una fila de la barra lateral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub title: &'static str,
    pub status: StepStatus,
    pub decision: bool,
}

/// Filas en orden de presentación.
pub fn items<E: EventStore>(script: &Script, controller: &FlowController<E>) -> Vec<SidebarItem> {
    controller.sidebar()
              .into_iter()
              .filter_map(|(id, status)| {
                  let (node, content) = script.step(id)?;
                  Some(SidebarItem { title: content.title,
                                     status,
                                     decision: node.kind.is_decision() })
              })
              .collect()
}

fn status_code(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Current => BLUE,
        StepStatus::Completed => GREEN,
        StepStatus::Skipped => STRIKE,
        StepStatus::Pending => DIM,
    }
}

pub fn render<E: EventStore>(script: &Script, controller: &FlowController<E>, style: Style) -> String {
    let rows = items(script, controller);
    let mut out = String::new();
    out.push_str(&style.paint(BOLD, labels::SIDEBAR_TITLE));
    out.push('\n');
    for (idx, item) in rows.iter().enumerate() {
        let icon = if item.decision { BRANCH_ICON } else { CHECK_ICON };
        let marker = if item.status == StepStatus::Current { ">" } else { " " };
        let code = status_code(item.status);
        out.push_str(&format!("{marker} {} {}\n", style.paint(code, icon), style.paint(code, item.title)));
        if idx + 1 < rows.len() {
            out.push_str(&format!("  {}\n", style.paint(DIM, CONNECTOR)));
        }
    }
    out
}
