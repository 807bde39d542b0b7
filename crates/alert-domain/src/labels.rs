//! Etiquetas fijas de la interfaz.

use alert_core::InputKind;

use crate::content::InputPrompt;

pub const HEADER_TITLE: &str = "Flujo Interactivo de Cumplimiento Transaccional";
pub const HEADER_SUBTITLE: &str = "Simulación de investigación de alertas con un Asistente de IA";
pub const SIDEBAR_TITLE: &str = "Pasos del Proceso";
pub const ROLE_LABEL: &str = "OC (Oficial de Cumplimiento)";
pub const COMMAND_AREA_LABEL: &str = "Comando de Voz Simulado";
pub const EXECUTE_TAG: &str = "EXECUTE";
pub const RESPONSE_HEADING: &str = "Respuesta del Asistente:";

const JUSTIFICATION_PROMPT: InputPrompt =
    InputPrompt { placeholder: "Ej: La transacción es consistente con el historial del cliente...",
                  submit_label: "Enviar Justificación y Cerrar",
                  microphone: false };

const VOICE_NOTE_PROMPT: InputPrompt = InputPrompt { placeholder: "Dicte o escriba su análisis aquí...",
                                                     submit_label: "Adjuntar Nota y Continuar",
                                                     microphone: true };

/// Área de texto correspondiente a cada tipo de entrada.
pub fn input_prompt(kind: InputKind) -> InputPrompt {
    match kind {
        InputKind::Justification => JUSTIFICATION_PROMPT,
        InputKind::VoiceNote => VOICE_NOTE_PROMPT,
    }
}
