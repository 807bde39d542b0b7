use std::cell::Cell;
use std::time::Duration;

/// Fuente de tiempo transcurrido desde el inicio de la sesión.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Reloj manual. Nunca retrocede.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Cell<Duration>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) -> Duration {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }

    pub fn advance_ms(&self, ms: u64) -> Duration {
        self.advance(Duration::from_millis(ms))
    }

    /// Salta hasta `at` si está en el futuro; si no, no hace nada.
    pub fn advance_to(&self, at: Duration) -> Duration {
        if at > self.now.get() {
            self.now.set(at);
        }
        self.now.get()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_clock_never_goes_back() {
        let clock = VirtualClock::new();
        clock.advance_ms(700);
        assert_eq!(clock.advance_to(Duration::from_millis(200)), Duration::from_millis(700));
        assert_eq!(clock.advance_to(Duration::from_millis(1300)), Duration::from_millis(1300));
        assert_eq!(clock.now(), Duration::from_millis(1300));
    }
}
