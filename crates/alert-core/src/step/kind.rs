use serde::{Deserialize, Serialize};

use super::StepId;

/// Rama de una decisión: sólo lleva el sucesor. El texto del control es
/// contenido de presentación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub next: StepId,
}

/// Las dos clasificaciones posibles de la alerta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPath {
    TruePositive,
    FalsePositive,
}

impl DecisionPath {
    /// La rama que queda descartada al elegir `self`.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Self::TruePositive => Self::FalsePositive,
            Self::FalsePositive => Self::TruePositive,
        }
    }
}

/// Texto libre que un paso exige antes de permitir avanzar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Justification,
    VoiceNote,
}

/// Forma de salida de un paso. Exactamente una de las tres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Un único sucesor.
    Linear { next: StepId },
    /// Dos ramas etiquetadas, cada una con su sucesor.
    Decision { true_positive: Branch, false_positive: Branch },
    /// Estado final: sin sucesor.
    Terminal,
}

impl StepKind {
    /// Sucesores en orden estable (verdadero positivo antes que falso positivo).
    pub fn successors(&self) -> Vec<StepId> {
        match self {
            Self::Linear { next } => vec![*next],
            Self::Decision { true_positive,
                             false_positive, } => vec![true_positive.next, false_positive.next],
            Self::Terminal => Vec::new(),
        }
    }

    /// Sucesor de la rama `path` si el paso es de decisión.
    pub fn branch(&self, path: DecisionPath) -> Option<StepId> {
        match (self, path) {
            (Self::Decision { true_positive, .. }, DecisionPath::TruePositive) => Some(true_positive.next),
            (Self::Decision { false_positive, .. }, DecisionPath::FalsePositive) => Some(false_positive.next),
            _ => None,
        }
    }

    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Decision { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }
}

/// Nodo del grafo de pasos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepNode {
    pub id: StepId,
    #[serde(flatten)]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_input: Option<InputKind>,
}

impl StepNode {
    pub fn new(id: StepId, kind: StepKind) -> Self {
        Self { id,
               kind,
               requires_input: None }
    }

    /// Sucesor directo de un paso lineal.
    pub fn next(&self) -> Option<StepId> {
        match self.kind {
            StepKind::Linear { next } => Some(next),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_branches_resolve_by_path() {
        let kind = StepKind::Decision { true_positive: Branch { next: StepId(5) },
                                        false_positive: Branch { next: StepId(6) } };
        assert_eq!(kind.branch(DecisionPath::TruePositive), Some(StepId(5)));
        assert_eq!(kind.branch(DecisionPath::FalsePositive), Some(StepId(6)));
        assert_eq!(kind.successors(), vec![StepId(5), StepId(6)]);
        assert_eq!(DecisionPath::TruePositive.other(), DecisionPath::FalsePositive);
    }

    #[test]
    fn linear_and_terminal_have_no_branches() {
        assert_eq!(StepKind::Linear { next: StepId(1) }.branch(DecisionPath::TruePositive), None);
        assert!(StepKind::Terminal.successors().is_empty());
    }
}
