//! Linear hillslope diffusion operator.
//!
//! Explicit forward-time centred-space update of an elevation field:
//! sediment flux proportional to local slope, so each step moves
//! material from nodes toward lower neighbours. Reads are taken from a
//! frozen copy of the step-start elevation (Jacobi stencil). Has a
//! [`RidgeProfile`] fast path using direct index arithmetic and a
//! generic fallback through [`Grid::neighbours`].
//!
//! Constructed via the builder pattern: [`LinearDiffusion::builder`].

use crate::context::StepContext;
use crate::process::Process;
use scarp_core::{FieldId, ProcessError};
use scarp_grid::{Grid, RidgeProfile};

/// A linear hillslope diffusion operator.
///
/// Each step computes, for every core node:
///
/// ```text
/// z[i] += D * dt / dx² * Σ_nb (z[nb] − z[i])
/// ```
///
/// where `D` is the transport coefficient (m²/yr) and `dx` the node
/// spacing. Fixed-value boundary nodes hold their elevation.
///
/// # Stability
///
/// The explicit scheme is stable for `dt <= 0.5 * dx² / D`, exposed
/// through [`Process::max_dt`] and [`LinearDiffusion::stable_dt`]. The
/// driver rejects configurations that exceed the bound.
///
/// # Construction
///
/// ```
/// use scarp_core::FieldId;
/// use scarp_process::LinearDiffusion;
///
/// let prop = LinearDiffusion::builder()
///     .field(FieldId(0))
///     .diffusivity(0.01)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct LinearDiffusion {
    field: FieldId,
    diffusivity: f64,
}

/// Builder for [`LinearDiffusion`].
///
/// Required: `field` and a positive `diffusivity`.
pub struct LinearDiffusionBuilder {
    field: Option<FieldId>,
    diffusivity: Option<f64>,
}

impl LinearDiffusion {
    /// Create a new builder for configuring a `LinearDiffusion` operator.
    pub fn builder() -> LinearDiffusionBuilder {
        LinearDiffusionBuilder {
            field: None,
            diffusivity: None,
        }
    }

    /// The transport coefficient, in m²/yr.
    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    /// Largest stable explicit step for the given spacing and
    /// transport coefficient: `0.5 * spacing² / diffusivity`.
    ///
    /// Use this to derive a fixed step size once, before configuring
    /// the driver; the step is then held constant for the whole run.
    pub fn stable_dt(spacing: f64, diffusivity: f64) -> f64 {
        0.5 * spacing * spacing / diffusivity
    }

    /// RidgeProfile fast path: three-point stencil by index arithmetic.
    fn step_profile(
        &self,
        ctx: &mut StepContext<'_>,
        len: u32,
        spacing: f64,
    ) -> Result<(), ProcessError> {
        let dt = ctx.dt();
        let alpha = self.diffusivity * dt / (spacing * spacing);

        let prev = self.read_prev(ctx)?;
        let out = self.write_out(ctx)?;

        for i in 1..(len as usize - 1) {
            let lap = prev[i - 1] - 2.0 * prev[i] + prev[i + 1];
            out[i] = prev[i] + alpha * lap;
        }

        self.check_finite(out)
    }

    /// Generic fallback through `Grid::neighbours`.
    fn step_generic(&self, ctx: &mut StepContext<'_>) -> Result<(), ProcessError> {
        let dt = ctx.dt();
        let spacing = ctx.grid().spacing();
        let alpha = self.diffusivity * dt / (spacing * spacing);

        // Precompute adjacency before taking the write borrow.
        let core: Vec<(usize, Vec<usize>)> = ctx
            .grid()
            .core_nodes()
            .into_iter()
            .map(|node| {
                let nbs = ctx
                    .grid()
                    .neighbours(node)
                    .iter()
                    .map(|nb| nb.index())
                    .collect();
                (node.index(), nbs)
            })
            .collect();

        let prev = self.read_prev(ctx)?;
        let out = self.write_out(ctx)?;

        for (i, nbs) in &core {
            let mut lap = 0.0;
            for &nb in nbs {
                lap += prev[*nb] - prev[*i];
            }
            out[*i] = prev[*i] + alpha * lap;
        }

        self.check_finite(out)
    }

    fn read_prev(&self, ctx: &StepContext<'_>) -> Result<Vec<f64>, ProcessError> {
        let prev = ctx
            .read(self.field)
            .ok_or_else(|| ProcessError::ExecutionFailed {
                reason: format!("field {} not readable", self.field),
            })?;
        if prev.len() != ctx.grid().node_count() {
            return Err(ProcessError::ExecutionFailed {
                reason: format!(
                    "field {} has {} elements, grid has {} nodes",
                    self.field,
                    prev.len(),
                    ctx.grid().node_count(),
                ),
            });
        }
        Ok(prev.to_vec())
    }

    fn write_out<'a>(&self, ctx: &'a mut StepContext<'_>) -> Result<&'a mut [f64], ProcessError> {
        ctx.write(self.field)
            .ok_or_else(|| ProcessError::ExecutionFailed {
                reason: format!("field {} not writable", self.field),
            })
    }

    fn check_finite(&self, out: &[f64]) -> Result<(), ProcessError> {
        match out.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(ProcessError::NonFiniteValue {
                field: self.field,
                node: Some(scarp_core::NodeId(i as u32)),
            }),
            None => Ok(()),
        }
    }
}

impl LinearDiffusionBuilder {
    /// Set the elevation field to diffuse.
    pub fn field(mut self, field: FieldId) -> Self {
        self.field = Some(field);
        self
    }

    /// Set the transport coefficient, in m²/yr. Must be finite and > 0.
    pub fn diffusivity(mut self, d: f64) -> Self {
        self.diffusivity = Some(d);
        self
    }

    /// Build the operator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `field` is not set
    /// - `diffusivity` is not set, non-finite, or <= 0
    pub fn build(self) -> Result<LinearDiffusion, String> {
        let field = self.field.ok_or_else(|| "field is required".to_string())?;
        let diffusivity = self
            .diffusivity
            .ok_or_else(|| "diffusivity is required".to_string())?;

        if !diffusivity.is_finite() || diffusivity <= 0.0 {
            return Err(format!(
                "diffusivity must be finite and > 0, got {diffusivity}"
            ));
        }

        Ok(LinearDiffusion { field, diffusivity })
    }
}

impl Process for LinearDiffusion {
    fn name(&self) -> &str {
        "linear_diffusion"
    }

    fn reads(&self) -> Vec<FieldId> {
        vec![self.field]
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![self.field]
    }

    fn max_dt(&self, grid: &dyn Grid) -> Option<f64> {
        Some(Self::stable_dt(grid.spacing(), self.diffusivity))
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), ProcessError> {
        if let Some(profile) = ctx.grid().downcast_ref::<RidgeProfile>() {
            let len = profile.len();
            let spacing = profile.spacing();
            self.step_profile(ctx, len, spacing)
        } else {
            self.step_generic(ctx)
        }
    }
}
