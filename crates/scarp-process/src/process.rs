//! The [`Process`] trait.
//!
//! Processes are modular, stateless operators executed in sequence each
//! step. They declare field dependencies at registration, enabling the
//! driver to validate the pipeline before the first step runs.

use crate::context::StepContext;
use scarp_core::{FieldId, ProcessError};
use scarp_grid::Grid;

/// A modular, stateless operator in the driver's per-step pipeline.
///
/// # Contract
///
/// - `step()` MUST be deterministic: same inputs produce identical outputs.
/// - `&self` — processes are stateless; mutable state lives in fields.
/// - `reads()` and `writes()` are called once at configuration, not
///   per-step.
/// - A returned error aborts the step; the driver adds no recovery.
///
/// # Object safety
///
/// This trait is object-safe; the driver stores processes as
/// `Vec<Box<dyn Process>>`.
///
/// # Examples
///
/// A minimal process that pins a field to a constant value:
///
/// ```
/// use scarp_core::{FieldId, ProcessError};
/// use scarp_process::{Process, StepContext};
///
/// struct ConstantFill {
///     field: FieldId,
///     value: f64,
/// }
///
/// impl Process for ConstantFill {
///     fn name(&self) -> &str { "constant_fill" }
///
///     fn reads(&self) -> Vec<FieldId> { Vec::new() }
///
///     fn writes(&self) -> Vec<FieldId> { vec![self.field] }
///
///     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), ProcessError> {
///         let buf = ctx.write(self.field).ok_or_else(|| {
///             ProcessError::ExecutionFailed {
///                 reason: format!("field {} not writable", self.field),
///             }
///         })?;
///         buf.fill(self.value);
///         Ok(())
///     }
/// }
///
/// let prop = ConstantFill { field: FieldId(0), value: 42.0 };
/// assert_eq!(prop.name(), "constant_fill");
/// ```
pub trait Process: Send + 'static {
    /// Human-readable name for error reporting and metrics.
    fn name(&self) -> &str;

    /// Fields this process reads each step.
    fn reads(&self) -> Vec<FieldId>;

    /// Fields this process mutates in place each step.
    fn writes(&self) -> Vec<FieldId>;

    /// Maximum stable timestep for this process on the given grid
    /// (e.g., the diffusion stability criterion).
    ///
    /// The driver validates `dt <= min(max_dt)` across all processes at
    /// configuration time. Return `None` to impose no constraint.
    fn max_dt(&self, _grid: &dyn Grid) -> Option<f64> {
        None
    }

    /// Execute the process for one step of size `ctx.dt()`.
    ///
    /// Called once per step in pipeline order, after the driver has
    /// applied uplift. The [`StepContext`] provides field access, the
    /// grid, the step counter, and the step size.
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), ProcessError>;
}
