//! Contenido de presentación de cada paso.
//!
//! Todo es texto literal fijo; no hay capa de traducción. Las respuestas del
//! asistente se modelan como bloques estructurados para que el render decida
//! el estilo.

use serde::Serialize;

/// Tono de un elemento de lista.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Positive,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingIcon {
    Search,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bullet {
    pub label: Option<&'static str>,
    pub text: &'static str,
    pub tone: Tone,
    /// Cola resaltada tras el texto.
    pub emphasis: Option<&'static str>,
}

impl Bullet {
    pub const fn labeled(label: &'static str, text: &'static str) -> Self {
        Self { label: Some(label),
               text,
               tone: Tone::Neutral,
               emphasis: None }
    }

    pub const fn toned(label: &'static str, text: &'static str, tone: Tone) -> Self {
        Self { label: Some(label),
               text,
               tone,
               emphasis: None }
    }

    pub fn with_emphasis(mut self, emphasis: &'static str) -> Self {
        self.emphasis = Some(emphasis);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum ResponseBlock {
    Paragraph { text: &'static str },
    Heading { text: &'static str },
    Bullets { items: Vec<Bullet> },
    Finding {
        icon: FindingIcon,
        title: &'static str,
        body: &'static str,
    },
    /// Mensaje de cierre satisfactorio.
    Success { text: &'static str },
}

/// Respuesta del asistente para un paso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Response {
    pub blocks: Vec<ResponseBlock>,
}

impl Response {
    pub fn paragraph(text: &'static str) -> Self {
        Self { blocks: vec![ResponseBlock::Paragraph { text }] }
    }

    pub fn success(text: &'static str) -> Self {
        Self { blocks: vec![ResponseBlock::Success { text }] }
    }

    pub fn from_blocks(blocks: Vec<ResponseBlock>) -> Self {
        Self { blocks }
    }

    /// Texto plano de la respuesta, un bloque por línea.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                ResponseBlock::Paragraph { text } | ResponseBlock::Heading { text } | ResponseBlock::Success { text } => {
                    lines.push((*text).to_string())
                }
                ResponseBlock::Bullets { items } => {
                    for item in items {
                        let mut line = match item.label {
                            Some(label) => format!("{label} {}", item.text),
                            None => item.text.to_string(),
                        };
                        if let Some(emphasis) = item.emphasis {
                            line.push(' ');
                            line.push_str(emphasis);
                        }
                        lines.push(line);
                    }
                }
                ResponseBlock::Finding { title, body, .. } => {
                    lines.push((*title).to_string());
                    lines.push((*body).to_string());
                }
            }
        }
        lines.join("\n")
    }
}

/// Texto de los dos controles de una decisión.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionLabels {
    pub true_positive: &'static str,
    pub false_positive: &'static str,
}

/// Área de texto libre de un paso con entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputPrompt {
    pub placeholder: &'static str,
    pub submit_label: &'static str,
    /// Se muestra el indicador de micrófono (la nota de voz es sólo texto).
    pub microphone: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepContent {
    pub title: &'static str,
    pub description: &'static str,
    /// Comando de voz simulado del control "proceder".
    pub command: &'static str,
    pub response: Response,
    pub decision: Option<DecisionLabels>,
}
