//! Field access traits shared by the store, the driver, and processes.

use crate::id::FieldId;

/// Read-only access to per-node field data.
///
/// Returns `None` if the field is not readable in the current context.
pub trait FieldReader {
    /// Read the data for a field as a flat per-node `f64` slice.
    ///
    /// Returns `None` if the field ID is invalid.
    fn read(&self, field: FieldId) -> Option<&[f64]>;
}

/// Mutable access to per-node field data.
///
/// Returns `None` if the field is not writable in the current context.
pub trait FieldWriter {
    /// Get a mutable slice for writing field data in place.
    ///
    /// Returns `None` if the field ID is invalid.
    fn write(&mut self, field: FieldId) -> Option<&mut [f64]>;
}

/// Combined read/write field access.
///
/// Processes mutate fields in place: read a frozen copy first, then
/// write through the same buffer. Blanket-implemented for any type
/// providing both halves, so the driver can hand its store to a
/// `StepContext` as a single `&mut dyn FieldBuffer`.
pub trait FieldBuffer: FieldReader + FieldWriter {}

impl<T: FieldReader + FieldWriter> FieldBuffer for T {}
