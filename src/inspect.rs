//! Vista estática del guion: grafo, orden de presentación y hash.

use alert_core::constants::GRAPH_FORMAT_VERSION;
use alert_core::StepKind;
use alert_domain::Script;
use serde_json::json;

use crate::errors::AppError;

fn describe(kind: &StepKind) -> String {
    match kind {
        StepKind::Linear { next } => format!("→ {next}"),
        StepKind::Decision { true_positive, false_positive } => {
            format!("VP → {} | FP → {}", true_positive.next, false_positive.next)
        }
        StepKind::Terminal => "fin".to_string(),
    }
}

/// Resumen legible, un paso por línea en orden de presentación.
pub fn summary(script: &Script) -> String {
    let graph = script.graph();
    let mut out = format!("formato {GRAPH_FORMAT_VERSION}\nhash {}\nentrada {}\n", graph.definition_hash(), graph.entry());
    for id in graph.display_order() {
        let Some((node, content)) = script.step(*id) else { continue };
        let input = node.requires_input.map(|k| format!(" [{k:?}]")).unwrap_or_default();
        out.push_str(&format!("{:<4} {:<36} {}{input}\n", id.to_string(), content.title, describe(&node.kind)));
    }
    out
}

/// Grafo y contenido como JSON.
pub fn to_json(script: &Script) -> Result<String, AppError> {
    let value = json!({
        "format_version": GRAPH_FORMAT_VERSION,
        "graph": script.graph().as_ref(),
        "content": script.contents(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_steps_in_display_order() {
        let script = Script::investigation().expect("script");
        let text = summary(&script);
        let decision = text.find("Punto de Decisión").expect("decision row");
        let tp_end = text.find("Fin: ROS Enviado").expect("tp terminal");
        let fp = text.find("Paso 5b").expect("fp row");
        assert!(decision < tp_end && tp_end < fp);
        assert!(text.contains(script.graph().definition_hash()));
    }

    #[test]
    fn json_carries_hash_and_content() {
        let script = Script::investigation().expect("script");
        let value: serde_json::Value = serde_json::from_str(&to_json(&script).expect("json")).expect("parse");
        assert_eq!(value["format_version"], GRAPH_FORMAT_VERSION);
        assert_eq!(value["graph"]["definition_hash"], script.graph().definition_hash());
        assert_eq!(value["content"]["4"]["title"], "Paso 4: Punto de Decisión Crítica");
    }
}
