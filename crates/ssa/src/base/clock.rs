use serde::{Deserialize, Serialize};

/// Simulated time plus the number of accepted events.
///
/// Both start at zero. Time never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationClock {
    time: f64,
    iteration: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of events applied so far.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Advance simulated time by `tau`; negative or NaN steps are ignored.
    pub(crate) fn advance(&mut self, tau: f64) {
        if tau > 0.0 {
            self.time += tau;
        }
    }

    pub(crate) fn tick(&mut self) {
        self.iteration += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        let clock = SimulationClock::new();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.iteration(), 0);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = SimulationClock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(f64::NAN);
        clock.tick();
        assert_eq!(clock.time(), 0.5);
        assert_eq!(clock.iteration(), 1);
    }
}
