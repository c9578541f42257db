//! Process fixtures for driver and pipeline tests.

use std::cell::Cell;

use scarp_core::{FieldId, ProcessError};
use scarp_process::{Process, StepContext};

/// A process that fills a field with a constant value every step.
pub struct ConstProcess {
    name: String,
    field: FieldId,
    value: f64,
}

impl ConstProcess {
    pub fn new(name: &str, field: FieldId, value: f64) -> Self {
        Self {
            name: name.to_string(),
            field,
            value,
        }
    }
}

impl Process for ConstProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn reads(&self) -> Vec<FieldId> {
        Vec::new()
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![self.field]
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), ProcessError> {
        let buf = ctx
            .write(self.field)
            .ok_or_else(|| ProcessError::ExecutionFailed {
                reason: format!("field {} not writable", self.field),
            })?;
        buf.fill(self.value);
        Ok(())
    }
}

/// A process that succeeds `succeed_count` times, then fails forever.
///
/// Uses interior mutability because processes step through `&self`.
pub struct FailingProcess {
    name: String,
    field: FieldId,
    remaining: Cell<usize>,
}

impl FailingProcess {
    pub fn new(name: &str, field: FieldId, succeed_count: usize) -> Self {
        Self {
            name: name.to_string(),
            field,
            remaining: Cell::new(succeed_count),
        }
    }
}

impl Process for FailingProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn reads(&self) -> Vec<FieldId> {
        Vec::new()
    }

    fn writes(&self) -> Vec<FieldId> {
        vec![self.field]
    }

    fn step(&self, _ctx: &mut StepContext<'_>) -> Result<(), ProcessError> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Err(ProcessError::ExecutionFailed {
                reason: "scripted failure".to_string(),
            });
        }
        self.remaining.set(remaining - 1);
        Ok(())
    }
}
