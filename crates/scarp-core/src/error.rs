//! Error types for the Scarp harness.
//!
//! Organized by subsystem: field store (construction time), process
//! (operator execution), and step (driver). The driver adds no recovery
//! layer — a process failure aborts the step and surfaces unchanged.

use std::error::Error;
use std::fmt;

use crate::id::{FieldId, NodeId};

/// Errors from registering or populating fields in a [`FieldStore`](crate::FieldStore).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// A field with this name is already registered.
    DuplicateName {
        /// The contested field name.
        name: String,
    },
    /// Field names must be non-empty.
    EmptyName,
    /// Supplied per-node data does not match the store's node count.
    LengthMismatch {
        /// The field being populated.
        field: FieldId,
        /// Node count of the store.
        expected: usize,
        /// Length of the supplied data.
        got: usize,
    },
    /// No field is registered under this name.
    UnknownField {
        /// The name that failed to resolve.
        name: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "field '{name}' is already registered")
            }
            Self::EmptyName => write!(f, "field name must be non-empty"),
            Self::LengthMismatch {
                field,
                expected,
                got,
            } => {
                write!(
                    f,
                    "field {field} expects {expected} node values, got {got}"
                )
            }
            Self::UnknownField { name } => write!(f, "no field named '{name}'"),
        }
    }
}

impl Error for FieldError {}

/// Errors from individual process execution.
///
/// Returned by `Process::step()` and wrapped in
/// [`StepError::ProcessFailed`] by the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum ProcessError {
    /// The process's step function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A non-finite value (NaN or infinity) was produced or encountered.
    NonFiniteValue {
        /// The field containing the value.
        field: FieldId,
        /// Index of the offending node, if known.
        node: Option<NodeId>,
    },
    /// A flow router returned output with the wrong shape or content.
    MalformedFlowFrame {
        /// Description of the shape or content problem.
        reason: String,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::NonFiniteValue { field, node } => {
                write!(f, "non-finite value in field {field}")?;
                if let Some(node) = node {
                    write!(f, " at node {node}")?;
                }
                Ok(())
            }
            Self::MalformedFlowFrame { reason } => {
                write!(f, "malformed flow frame: {reason}")
            }
        }
    }
}

impl Error for ProcessError {}

/// Errors from the driver during a step.
///
/// Failures surface directly from the failing process; the driver does
/// not catch or retry (a failed step leaves the clock un-advanced).
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A process returned an error during execution.
    ProcessFailed {
        /// Name of the failing process.
        name: String,
        /// The underlying process error.
        reason: ProcessError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessFailed { name, reason } => {
                write!(f, "process '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProcessFailed { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_error_display_includes_node() {
        let err = ProcessError::NonFiniteValue {
            field: FieldId(0),
            node: Some(NodeId(12)),
        };
        let msg = err.to_string();
        assert!(msg.contains("field 0"));
        assert!(msg.contains("node 12"));
    }

    #[test]
    fn step_error_chains_source() {
        let err = StepError::ProcessFailed {
            name: "linear_diffusion".to_string(),
            reason: ProcessError::ExecutionFailed {
                reason: "elevation not readable".to_string(),
            },
        };
        assert!(err.to_string().contains("linear_diffusion"));
        assert!(err.source().is_some());
    }

    #[test]
    fn field_error_display() {
        let err = FieldError::LengthMismatch {
            field: FieldId(1),
            expected: 10,
            got: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("7"));
    }
}
