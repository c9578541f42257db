//! Closed-form steady-state hillslope profile.
//!
//! For uniform uplift `U` and linear diffusion with transport
//! coefficient `D` on a symmetric one-dimensional ridge, the transient
//! solution relaxes toward a parabola. This module evaluates that
//! parabola as a pure function of position, for use as a reference
//! curve against simulated profiles.

use scarp_grid::RidgeProfile;

/// The analytical steady-state solution for a uniformly uplifting,
/// linearly diffusing ridge:
///
/// ```text
/// z(y) = (U / 2D) · (H² − (y − y0)²)
/// ```
///
/// where `H` is the domain half-width and `y0` the divide position
/// (domain midpoint). Pure evaluation — no internal state, no
/// mutation; construction rejects a non-positive diffusivity.
///
/// # Examples
///
/// ```
/// use scarp_grid::RidgeProfile;
/// use scarp_process::HillslopeSteadyState;
///
/// let grid = RidgeProfile::new(101, 2.0).unwrap();
/// let steady = HillslopeSteadyState::new(1e-4, 0.01).unwrap();
///
/// // Peak at the divide: (U / 2D) · H² = 50 m for H = 100.
/// let profile = steady.profile(&grid);
/// assert!((profile[50] - 50.0).abs() < 1e-9);
/// assert_eq!(profile[0], 0.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HillslopeSteadyState {
    uplift: f64,
    diffusivity: f64,
}

impl HillslopeSteadyState {
    /// Create a steady-state evaluator for uplift rate `uplift` (m/yr)
    /// and transport coefficient `diffusivity` (m²/yr).
    ///
    /// # Errors
    ///
    /// Returns `Err` if `uplift` is non-finite or `diffusivity` is
    /// non-finite or <= 0.
    pub fn new(uplift: f64, diffusivity: f64) -> Result<Self, String> {
        if !uplift.is_finite() {
            return Err(format!("uplift must be finite, got {uplift}"));
        }
        if !diffusivity.is_finite() || diffusivity <= 0.0 {
            return Err(format!(
                "diffusivity must be finite and > 0, got {diffusivity}"
            ));
        }
        Ok(Self { uplift, diffusivity })
    }

    /// Steady-state elevation at `distance_from_divide` metres from the
    /// divide, on a ridge of half-width `half_width` metres.
    pub fn elevation_at(&self, half_width: f64, distance_from_divide: f64) -> f64 {
        self.uplift / (2.0 * self.diffusivity)
            * (half_width * half_width - distance_from_divide * distance_from_divide)
    }

    /// Peak steady-state elevation, reached at the divide.
    pub fn peak(&self, half_width: f64) -> f64 {
        self.elevation_at(half_width, 0.0)
    }

    /// Sample the steady-state profile at every node of a transect.
    pub fn profile(&self, grid: &RidgeProfile) -> Vec<f64> {
        let half_width = grid.half_width();
        let divide = grid.divide_offset();
        (0..grid.len())
            .map(|i| {
                let offset = grid.offset(scarp_core::NodeId(i));
                self.elevation_at(half_width, offset - divide)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_rejects_bad_diffusivity() {
        assert!(HillslopeSteadyState::new(1e-4, 0.0).is_err());
        assert!(HillslopeSteadyState::new(1e-4, -0.01).is_err());
        assert!(HillslopeSteadyState::new(1e-4, f64::NAN).is_err());
        assert!(HillslopeSteadyState::new(f64::NAN, 0.01).is_err());
        assert!(HillslopeSteadyState::new(1e-4, 0.01).is_ok());
    }

    #[test]
    fn boundary_elevation_is_zero() {
        let s = HillslopeSteadyState::new(1e-4, 0.01).unwrap();
        assert_eq!(s.elevation_at(100.0, 100.0), 0.0);
        assert_eq!(s.elevation_at(100.0, -100.0), 0.0);
    }

    #[test]
    fn peak_value_worked_example() {
        // U = 1e-4, D = 0.01, H = 100: peak = 1e-4 / 0.02 * 1e4 = 50 m.
        let s = HillslopeSteadyState::new(1e-4, 0.01).unwrap();
        assert!((s.peak(100.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn profile_is_symmetric_about_divide() {
        let grid = RidgeProfile::new(21, 5.0).unwrap();
        let s = HillslopeSteadyState::new(2e-4, 0.05).unwrap();
        let profile = s.profile(&grid);
        for i in 0..21 {
            let mirror = 20 - i;
            assert!(
                (profile[i] - profile[mirror]).abs() < 1e-9,
                "asymmetry at node {i}: {} vs {}",
                profile[i],
                profile[mirror]
            );
        }
    }

    #[test]
    fn profile_peaks_at_divide() {
        let grid = RidgeProfile::new(21, 5.0).unwrap();
        let s = HillslopeSteadyState::new(2e-4, 0.05).unwrap();
        let profile = s.profile(&grid);
        let max = profile.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(profile[10], max);
    }

    proptest! {
        #[test]
        fn elevation_scales_linearly_with_uplift(
            u in 1e-6f64..1e-2,
            d in 1e-4f64..1.0,
            y in -50.0f64..50.0,
        ) {
            let one = HillslopeSteadyState::new(u, d).unwrap();
            let two = HillslopeSteadyState::new(2.0 * u, d).unwrap();
            let a = one.elevation_at(100.0, y);
            let b = two.elevation_at(100.0, y);
            prop_assert!((b - 2.0 * a).abs() < 1e-9 * a.abs().max(1.0));
        }

        #[test]
        fn elevation_nonnegative_inside_domain(
            u in 1e-6f64..1e-2,
            d in 1e-4f64..1.0,
            y in -100.0f64..100.0,
        ) {
            let s = HillslopeSteadyState::new(u, d).unwrap();
            prop_assert!(s.elevation_at(100.0, y) >= 0.0);
        }
    }
}
