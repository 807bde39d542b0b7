// script.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use alert_core::{InputKind, StepGraph, StepId, StepNode};

use crate::content::{Bullet, DecisionLabels, FindingIcon, InputPrompt, Response, ResponseBlock, StepContent, Tone};
use crate::labels;
use crate::DomainError;

/// Orden de la barra lateral: línea principal, rama de verdadero positivo y
/// después la de falso positivo. Se valida contra el grafo al construir.
pub const CURATED_DISPLAY_ORDER: [u8; 10] = [0, 1, 2, 3, 4, 5, 7, 9, 6, 8];

/// Guion completo: topología validada más el contenido de cada paso.
#[derive(Debug, Clone)]
pub struct Script {
    graph: Arc<StepGraph>,
    content: BTreeMap<StepId, StepContent>,
}

impl Script {
    /// Une grafo y contenido. Cada paso debe tener exactamente un
    /// `StepContent`, y sólo los pasos de decisión llevan etiquetas de
    /// decisión.
    pub fn new(graph: StepGraph, content: BTreeMap<StepId, StepContent>) -> Result<Self, DomainError> {
        for node in graph.nodes() {
            let entry = content.get(&node.id).ok_or(DomainError::MissingContent(node.id))?;
            if entry.decision.is_some() != node.kind.is_decision() {
                return Err(DomainError::DecisionLabels(node.id));
            }
        }
        if let Some(orphan) = content.keys().find(|id| !graph.contains(**id)) {
            return Err(DomainError::OrphanContent(*orphan));
        }
        Ok(Self { graph: Arc::new(graph),
                  content })
    }

    /// Investigación de la alerta 2025-452 (ACME Corp S.A.).
    pub fn investigation() -> Result<Self, DomainError> {
        let graph = StepGraph::builder().linear(0, 1)
                                        .linear(1, 2)
                                        .linear(2, 3)
                                        .linear(3, 4)
                                        .decision(4, 5, 6)
                                        .linear(5, 7)
                                        .linear(6, 8)
                                        .requires_input(6, InputKind::Justification)
                                        .linear(7, 9)
                                        .requires_input(7, InputKind::VoiceNote)
                                        .terminal(8)
                                        .terminal(9)
                                        .display_order(CURATED_DISPLAY_ORDER)
                                        .build()?;
        let script = Self::new(graph, investigation_content())?;
        log::debug!("investigation script ready ({} steps)", script.graph.len());
        Ok(script)
    }

    pub fn graph(&self) -> &Arc<StepGraph> {
        &self.graph
    }

    pub fn content(&self, id: StepId) -> Option<&StepContent> {
        self.content.get(&id)
    }

    /// Contenido de todos los pasos por id.
    pub fn contents(&self) -> &BTreeMap<StepId, StepContent> {
        &self.content
    }

    /// Nodo y contenido juntos.
    pub fn step(&self, id: StepId) -> Option<(&StepNode, &StepContent)> {
        Some((self.graph.get(id)?, self.content.get(&id)?))
    }

    /// Área de texto del paso, si pide entrada.
    pub fn input_prompt(&self, id: StepId) -> Option<InputPrompt> {
        self.graph.get(id)?.requires_input.map(labels::input_prompt)
    }
}

fn investigation_content() -> BTreeMap<StepId, StepContent> {
    let mut steps = BTreeMap::new();

    steps.insert(StepId(0),
                 StepContent { title: "Inicio: Nueva Alerta",
                               description: "El sistema de monitoreo transaccional ha generado una nueva alerta. Inicie el proceso de investigación.",
                               command: "Asistente Cumplimiento, [Abre Alerta] 2025-452.",
                               response: Response::paragraph("Alerta 2025-452 abierta. Cargando expediente del cliente y actividad transaccional relevante..."),
                               decision: None });

    steps.insert(StepId(1),
                 StepContent { title: "Paso 1: Carga y Resumen",
                               description: "El expediente está cargado. Solicite un resumen para obtener una vista general del perfil de riesgo y la actividad reciente.",
                               command: "[Dame Perfil de Riesgo] y la actividad transaccional de 6 meses.",
                               response: Response::from_blocks(vec![
                                   ResponseBlock::Heading { text: "Resumen del Expediente:" },
                                   ResponseBlock::Bullets { items: vec![
                                       Bullet::labeled("Cliente:", "ACME Corp S.A."),
                                       Bullet::labeled("Nivel de Riesgo:", "Medio-Alto."),
                                       Bullet::labeled("Actividad Típica:", "Transferencias internacionales B2B, sector import/export."),
                                       Bullet::labeled("Alerta Actual:", "Transferencia de $250,000 USD a una nueva contraparte en jurisdicción de alto riesgo."),
                                   ] },
                                   ResponseBlock::Paragraph { text: "Presentando el historial transaccional de los últimos 6 meses..." },
                               ]),
                               decision: None });

    steps.insert(StepId(2),
                 StepContent { title: "Paso 2: Búsqueda de Datos",
                               description: "El Asistente ha iniciado automáticamente consultas en bases de datos internas (KYC) y externas (noticias adversas, registros corporativos) para enriquecer el perfil.",
                               command: "Procesando...",
                               response: Response::from_blocks(vec![
                                   ResponseBlock::Heading { text: "Resultados de Búsqueda Automática:" },
                                   ResponseBlock::Bullets { items: vec![
                                       Bullet::toned("Interno:", "Perfil KYC completo y actualizado. Sin alertas previas de naturaleza similar.", Tone::Positive),
                                       Bullet::toned("Externo:", "Se encontró una mención en medios sobre la contraparte relacionada con investigaciones de evasión fiscal hace 2 años.", Tone::Warning)
                                           .with_emphasis("Requiere atención."),
                                   ] },
                               ]),
                               decision: None });

    steps.insert(StepId(3),
                 StepContent { title: "Paso 3: Consulta Regulatoria",
                               description: "Con la información de medios adversos, es prudente realizar una consulta regulatoria específica y revisar los procedimientos internos.",
                               command: "[Busca en Listas de Sanciones] y [Lee Procedimiento] de DDI.",
                               response: Response::from_blocks(vec![
                                   ResponseBlock::Finding { icon: FindingIcon::Search,
                                                            title: "Resultados de Listas de Sanciones (OFAC, ONU, UE):",
                                                            body: "No se encontraron coincidencias directas para la contraparte ni sus directores conocidos." },
                                   ResponseBlock::Finding { icon: FindingIcon::Document,
                                                            title: "Procedimiento Interno (Debida Diligencia Intensificada - DDI):",
                                                            body: "Para transacciones con contrapartes en jurisdicciones de alto riesgo con medios adversos, se requiere la aprobación de un segundo nivel y la documentación del propósito comercial." },
                               ]),
                               decision: None });

    steps.insert(StepId(4),
                 StepContent { title: "Paso 4: Punto de Decisión Crítica",
                               description: "Analice toda la información recopilada: la naturaleza de la transacción, el perfil del cliente, los medios adversos sobre la contraparte y los requisitos del procedimiento interno. Determine si la alerta justifica una investigación intensiva (Verdadero Positivo) o si puede ser desestimada (Falso Positivo).",
                               command: "Analiza el riesgo vs. el patrón. Elige clasificar.",
                               response: Response::paragraph("A la espera de su decisión. Por favor, clasifique la alerta para continuar con el flujo de trabajo apropiado."),
                               decision: Some(DecisionLabels { true_positive: "[Clasifica como Verdadero Positivo] y [Crea Borrador del ROS].",
                                                               false_positive: "[Clasifica como Falso Positivo] y [Cierra con Justificación]." }) });

    steps.insert(StepId(5),
                 StepContent { title: "Paso 5a: Verdadero Positivo",
                               description: "Ha determinado que la operación es sospechosa. El Asistente ahora creará un borrador del Reporte de Operación Sospechosa (ROS) con la información recopilada.",
                               command: "Generando borrador del ROS...",
                               response: Response::paragraph("Borrador del ROS (Reporte de Operación Sospechosa) creado y adjuntado al expediente. El documento incluye datos del cliente, detalles de la transacción y hallazgos de la investigación. Por favor, proceda a añadir su análisis cualitativo."),
                               decision: None });

    steps.insert(StepId(6),
                 StepContent { title: "Paso 5b: Falso Positivo",
                               description: "Ha determinado que la operación no es sospechosa. Por favor, proporcione una justificación clara y concisa para cerrar la alerta. Esta justificación quedará registrada para fines de auditoría.",
                               command: "Esperando justificación...",
                               response: Response::paragraph("Por favor, ingrese su justificación en el campo de texto a continuación para cerrar la alerta como Falso Positivo."),
                               decision: None });

    steps.insert(StepId(7),
                 StepContent { title: "Paso 6: Análisis del Oficial",
                               description: "El borrador del ROS está listo. Su experiencia es crucial. Añada su análisis cualitativo, explicando por qué considera la operación sospechosa. Puede usar una nota de voz para mayor agilidad.",
                               command: "[Añade Nota de Voz] al Análisis del Oficial.",
                               response: Response::paragraph("Grabadora de voz activada. Por favor, dicte su análisis. El sistema transcribirá y adjuntará el texto al ROS."),
                               decision: None });

    steps.insert(StepId(8),
                 StepContent { title: "Fin: Alerta Cerrada",
                               description: "La alerta ha sido clasificada como Falso Positivo y cerrada con la justificación proporcionada. El expediente ha sido archivado.",
                               command: "Proceso finalizado.",
                               response: Response::success("Proceso completado. La alerta 2025-452 ha sido archivada correctamente."),
                               decision: None });

    steps.insert(StepId(9),
                 StepContent { title: "Fin: ROS Enviado",
                               description: "El Asistente ha transcrito su nota de voz. El ROS está completo y ha sido marcado para revisión final antes de ser enviado a la autoridad competente.",
                               command: "Aprobar y enviar.",
                               response: Response::success("Transcripción completada y añadida al ROS. El expediente está listo para la revisión final y envío. Proceso completado."),
                               decision: None });

    steps
}
