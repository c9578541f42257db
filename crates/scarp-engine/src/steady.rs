//! Steady-state detection against a reference profile.
//!
//! Steady state is reached when erosion or diffusion balances uplift
//! and elevation stops changing; for the uniform-uplift diffusion case
//! the limit is the closed-form parabola from
//! [`HillslopeSteadyState`](scarp_process::HillslopeSteadyState).
//! This module compares a live simulation against any such reference
//! curve and flags the run once the max-norm deviation falls inside a
//! tolerance.

use crate::driver::Simulation;
use scarp_core::StepError;

/// Compares simulated profiles against a fixed reference curve.
#[derive(Clone, Debug)]
pub struct SteadyStateCheck {
    reference: Vec<f64>,
    tolerance: f64,
}

impl SteadyStateCheck {
    /// Create a check against `reference` with a tolerance of
    /// `rel_tolerance` times the reference's peak magnitude (e.g.
    /// `0.01` flags steady state within 1% of peak elevation).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the reference is empty or contains non-finite
    /// values, or if `rel_tolerance` is non-finite or <= 0.
    pub fn new(reference: Vec<f64>, rel_tolerance: f64) -> Result<Self, String> {
        if reference.is_empty() {
            return Err("reference profile must be non-empty".to_string());
        }
        if reference.iter().any(|v| !v.is_finite()) {
            return Err("reference profile must be finite".to_string());
        }
        if !rel_tolerance.is_finite() || rel_tolerance <= 0.0 {
            return Err(format!(
                "rel_tolerance must be finite and > 0, got {rel_tolerance}"
            ));
        }
        let peak = reference.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        Ok(Self {
            reference,
            tolerance: rel_tolerance * peak,
        })
    }

    /// The absolute deviation tolerance, in metres.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Max-norm deviation between `profile` and the reference.
    ///
    /// A profile of a different length never matches (returns
    /// infinity).
    pub fn max_deviation(&self, profile: &[f64]) -> f64 {
        if profile.len() != self.reference.len() {
            return f64::INFINITY;
        }
        profile
            .iter()
            .zip(&self.reference)
            .fold(0.0f64, |acc, (a, b)| acc.max((a - b).abs()))
    }

    /// Whether `profile` is within tolerance of the reference.
    pub fn is_steady(&self, profile: &[f64]) -> bool {
        self.max_deviation(profile) <= self.tolerance
    }
}

/// Outcome of [`run_to_steady`].
#[derive(Clone, Copy, Debug)]
pub struct SteadyStateReport {
    /// Whether the deviation fell inside tolerance within the budget.
    pub reached: bool,
    /// Steps executed by this call.
    pub steps_run: u64,
    /// Final max-norm deviation from the reference, in metres.
    pub deviation: f64,
}

/// Drive `sim` until its elevation matches `check`'s reference or
/// `max_steps` is exhausted, testing every `check_every` steps.
///
/// `check_every` is clamped to at least 1. Process failures abort and
/// surface unchanged.
pub fn run_to_steady(
    sim: &mut Simulation,
    check: &SteadyStateCheck,
    max_steps: u64,
    check_every: u64,
) -> Result<SteadyStateReport, StepError> {
    let stride = check_every.max(1);
    let mut steps_run = 0;

    while steps_run < max_steps {
        let chunk = stride.min(max_steps - steps_run);
        sim.run(chunk)?;
        steps_run += chunk;
        if check.is_steady(sim.elevation()) {
            return Ok(SteadyStateReport {
                reached: true,
                steps_run,
                deviation: check.max_deviation(sim.elevation()),
            });
        }
    }

    Ok(SteadyStateReport {
        reached: check.is_steady(sim.elevation()),
        steps_run,
        deviation: check.max_deviation(sim.elevation()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_bad_input() {
        assert!(SteadyStateCheck::new(vec![], 0.01).is_err());
        assert!(SteadyStateCheck::new(vec![1.0, f64::NAN], 0.01).is_err());
        assert!(SteadyStateCheck::new(vec![1.0], 0.0).is_err());
        assert!(SteadyStateCheck::new(vec![1.0], -0.5).is_err());
        assert!(SteadyStateCheck::new(vec![1.0], f64::NAN).is_err());
    }

    #[test]
    fn tolerance_is_relative_to_peak() {
        let check = SteadyStateCheck::new(vec![0.0, 25.0, 50.0, 25.0, 0.0], 0.01).unwrap();
        assert!((check.tolerance() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn max_deviation_is_max_norm() {
        let check = SteadyStateCheck::new(vec![0.0, 10.0, 0.0], 0.01).unwrap();
        let dev = check.max_deviation(&[0.5, 10.2, -0.1]);
        assert!((dev - 0.5).abs() < 1e-12);
    }

    #[test]
    fn length_mismatch_never_steady() {
        let check = SteadyStateCheck::new(vec![0.0, 1.0], 0.5).unwrap();
        assert_eq!(check.max_deviation(&[0.0]), f64::INFINITY);
        assert!(!check.is_steady(&[0.0]));
    }

    #[test]
    fn exact_match_is_steady() {
        let reference = vec![0.0, 3.0, 4.0, 3.0, 0.0];
        let check = SteadyStateCheck::new(reference.clone(), 0.01).unwrap();
        assert!(check.is_steady(&reference));
        assert_eq!(check.max_deviation(&reference), 0.0);
    }
}
