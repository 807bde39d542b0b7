use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEffect {
    pub due: Duration,
    pub effect: Effect,
}

/// Cola de efectos ordenada por vencimiento. Con vencimientos iguales se
/// respeta el orden de inserción.
#[derive(Debug, Default, Clone)]
pub struct Timeline {
    pending: Vec<ScheduledEffect>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, effect: Effect) {
        let at = self.pending.partition_point(|e| e.due <= due);
        self.pending.insert(at, ScheduledEffect { due, effect });
    }

    /// Extrae el siguiente efecto vencido en `now`, si lo hay.
    pub fn pop_due(&mut self, now: Duration) -> Option<ScheduledEffect> {
        match self.pending.first() {
            Some(first) if first.due <= now => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.first().map(|e| e.due)
    }

    /// Descarta todo lo pendiente y devuelve cuántos efectos había.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
