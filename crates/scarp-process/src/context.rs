//! Execution context passed to processes during step execution.

use scarp_core::{FieldBuffer, FieldId, StepId};
use scarp_grid::Grid;

/// Execution context passed to each process's `step()` method.
///
/// Wraps the driver's field store behind `&mut dyn FieldBuffer` to keep
/// the [`Process`](crate::Process) trait object-safe and processes
/// testable against any store. Processes mutate fields in place; the
/// usual pattern copies the step-start values first, then writes
/// through the same buffer (Jacobi stencil):
///
/// ```
/// use scarp_core::{FieldDef, FieldStore};
/// use scarp_grid::RidgeProfile;
/// use scarp_process::StepContext;
/// use scarp_core::StepId;
///
/// let grid = RidgeProfile::new(5, 1.0).unwrap();
/// let mut store = FieldStore::new(5);
/// let z = store.register(FieldDef::named("z")).unwrap();
///
/// let mut ctx = StepContext::new(&mut store, &grid, StepId(1), 0.5);
/// let prev = ctx.read(z).unwrap().to_vec();
/// let out = ctx.write(z).unwrap();
/// out[2] = prev[2] + 1.0;
/// ```
pub struct StepContext<'a> {
    fields: &'a mut dyn FieldBuffer,
    grid: &'a dyn Grid,
    step_id: StepId,
    dt: f64,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the driver, not by processes directly. For
    /// testing, construct one over a plain
    /// [`FieldStore`](scarp_core::FieldStore).
    pub fn new(
        fields: &'a mut dyn FieldBuffer,
        grid: &'a dyn Grid,
        step_id: StepId,
        dt: f64,
    ) -> Self {
        Self {
            fields,
            grid,
            step_id,
            dt,
        }
    }

    /// Read a field's current per-node data.
    pub fn read(&self, field: FieldId) -> Option<&[f64]> {
        self.fields.read(field)
    }

    /// Mutable access to a field's per-node data.
    pub fn write(&mut self, field: FieldId) -> Option<&mut [f64]> {
        self.fields.write(field)
    }

    /// The spatial domain. Use `grid().downcast_ref::<T>()` for
    /// backend-specific fast paths.
    pub fn grid(&self) -> &dyn Grid {
        self.grid
    }

    /// Current step counter (the step being executed).
    pub fn step_id(&self) -> StepId {
        self.step_id
    }

    /// Configured step size, in years.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}
