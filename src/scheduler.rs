//! Fixed-timestep scheduler: turns wall-clock time into whole simulation ticks.

/// Elapsed time above this is dropped so a stalled host (suspend, a slow
/// terminal) does not replay a burst of ticks.
pub const MAX_FRAME_MS: u64 = 100;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step_ms: u64,
    accumulated_ms: u64,
}

impl FixedStep {
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1),
            accumulated_ms: 0,
        }
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    /// Add `dt_ms` of elapsed time and return how many steps are now due.
    /// The remainder carries over to the next call.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        self.accumulated_ms += dt_ms.min(MAX_FRAME_MS);
        let due = self.accumulated_ms / self.step_ms;
        self.accumulated_ms %= self.step_ms;
        due as u32
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps_with_remainder() {
        let mut step = FixedStep::new(16);
        assert_eq!(step.advance(10), 0);
        assert_eq!(step.advance(10), 1); // 20ms total, 4 left over
        assert_eq!(step.advance(28), 2); // 32ms
        assert_eq!(step.advance(0), 0);
    }

    #[test]
    fn test_dt_clamped() {
        let mut step = FixedStep::new(16);
        // 5 seconds collapses to 100ms = 6 steps
        assert_eq!(step.advance(5_000), 6);
    }

    #[test]
    fn test_reset_drops_remainder() {
        let mut step = FixedStep::new(16);
        step.advance(15);
        step.reset();
        assert_eq!(step.advance(1), 0);
    }

    #[test]
    fn test_zero_step_is_bumped() {
        let step = FixedStep::new(0);
        assert_eq!(step.step_ms(), 1);
    }
}
