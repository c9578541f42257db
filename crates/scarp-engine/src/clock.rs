//! Simulated-time accounting.

use scarp_core::StepId;

/// Number of whole steps of size `dt` that fit in `duration`.
///
/// This is the iteration count the driver executes for a requested run
/// duration: `floor(duration / dt)`. Non-positive durations yield zero
/// steps. `dt` must be positive; the driver validates that before any
/// run starts.
pub fn steps_for(duration: f64, dt: f64) -> u64 {
    if duration <= 0.0 {
        return 0;
    }
    (duration / dt).floor() as u64
}

/// Monotonic simulated-time counter.
///
/// Tracks the completed step count and the accumulated simulated time.
/// Advances by exactly the configured step size per iteration and never
/// decreases except through an explicit [`SimClock::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimClock {
    step: StepId,
    elapsed: f64,
}

impl SimClock {
    /// A clock at step zero, time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed steps.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Accumulated simulated time, in years.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance by one step of size `dt`.
    pub fn advance(&mut self, dt: f64) {
        debug_assert!(dt > 0.0, "clock must advance by a positive step");
        self.step = self.step.next();
        self.elapsed += dt;
    }

    /// Return to step zero, time zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = SimClock::new();
        clock.advance(100.0);
        clock.advance(100.0);
        assert_eq!(clock.step(), StepId(2));
        assert_eq!(clock.elapsed(), 200.0);
    }

    #[test]
    fn reset_zeroes() {
        let mut clock = SimClock::new();
        clock.advance(1.0);
        clock.reset();
        assert_eq!(clock, SimClock::new());
    }

    #[test]
    fn steps_for_worked_examples() {
        assert_eq!(steps_for(1000.0, 100.0), 10);
        assert_eq!(steps_for(1050.0, 100.0), 10);
        assert_eq!(steps_for(99.9, 100.0), 0);
        assert_eq!(steps_for(0.0, 100.0), 0);
        assert_eq!(steps_for(-5.0, 100.0), 0);
    }

    proptest! {
        #[test]
        fn steps_for_is_floor(duration in 0.0f64..1e9, dt in 1e-3f64..1e6) {
            let steps = steps_for(duration, dt);
            prop_assert_eq!(steps, (duration / dt).floor() as u64);
        }

        #[test]
        fn elapsed_never_decreases(dts in prop::collection::vec(1e-3f64..1e3, 1..64)) {
            let mut clock = SimClock::new();
            let mut last = 0.0;
            for dt in dts {
                clock.advance(dt);
                prop_assert!(clock.elapsed() >= last);
                last = clock.elapsed();
            }
        }

        #[test]
        fn fixed_dt_elapsed_is_product(steps in 0u64..10_000, dt in 1e-3f64..1e3) {
            let mut clock = SimClock::new();
            for _ in 0..steps {
                clock.advance(dt);
            }
            prop_assert_eq!(clock.step(), StepId(steps));
            let expected = steps as f64 * dt;
            prop_assert!((clock.elapsed() - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }
}
