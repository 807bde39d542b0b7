use std::fmt;

use serde::{Deserialize, Serialize};

/// Identificador estable de un paso dentro del grafo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u8);

impl StepId {
    #[inline]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for StepId {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
