//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the input for constructing a [`Simulation`](crate::Simulation).
//! [`validate()`](SimulationConfig::validate) checks structural
//! invariants at startup so the per-step hot path runs unchecked.

use std::error::Error;
use std::fmt;

use scarp_core::{FieldDef, FieldError, FieldId, Uplift};
use scarp_grid::Grid;
use scarp_process::Process;

/// Errors detected during [`SimulationConfig::validate()`].
#[derive(Debug)]
pub enum ConfigError {
    /// The step size is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid dt value.
        value: f64,
    },
    /// No processes registered.
    EmptyPipeline,
    /// No fields registered.
    NoFields,
    /// A process (or the driver itself) references an unregistered field.
    UndefinedField {
        /// Which process references it (`"driver"` for the uplift target).
        process: String,
        /// The missing field.
        field: FieldId,
    },
    /// The configured dt exceeds a process's stability bound.
    DtTooLarge {
        /// The dt that was requested.
        configured_dt: f64,
        /// The tightest stability bound.
        max_supported: f64,
        /// Which process constrains it.
        constraining_process: String,
    },
    /// A process's `max_dt()` returned a non-finite or non-positive value.
    InvalidMaxDt {
        /// Which process.
        process: String,
        /// The invalid bound.
        value: f64,
    },
    /// The uplift field fails shape or finiteness checks.
    InvalidUplift {
        /// Description of the problem.
        reason: String,
    },
    /// Initial elevation does not cover exactly one value per node.
    InitialElevationMismatch {
        /// Node count of the grid.
        expected: usize,
        /// Length of the supplied initial elevation.
        got: usize,
    },
    /// Field registration failed (duplicate or empty name).
    Field(FieldError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::EmptyPipeline => write!(f, "pipeline has no processes"),
            Self::NoFields => write!(f, "no fields registered"),
            Self::UndefinedField { process, field } => {
                write!(f, "process '{process}' references undefined field {field}")
            }
            Self::DtTooLarge {
                configured_dt,
                max_supported,
                constraining_process,
            } => {
                write!(
                    f,
                    "dt {configured_dt} exceeds stability bound {max_supported} \
                     (constrained by '{constraining_process}')"
                )
            }
            Self::InvalidMaxDt { process, value } => {
                write!(
                    f,
                    "process '{process}' returned invalid max_dt: {value} \
                     (must be finite and positive)"
                )
            }
            Self::InvalidUplift { reason } => write!(f, "invalid uplift: {reason}"),
            Self::InitialElevationMismatch { expected, got } => {
                write!(
                    f,
                    "initial elevation has {got} values, grid has {expected} nodes"
                )
            }
            Self::Field(e) => write!(f, "field: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for ConfigError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

/// Complete configuration for constructing a simulation.
///
/// All parameters are set by direct in-process assignment; there is no
/// file or CLI surface. `FieldId(n)` corresponds to `fields[n]`.
pub struct SimulationConfig {
    /// Spatial domain for the simulation.
    pub grid: Box<dyn Grid>,
    /// Field definitions. The driver registers them in order.
    pub fields: Vec<FieldDef>,
    /// Which registered field is the elevation the driver uplifts.
    pub elevation_field: FieldId,
    /// Starting elevation, one value per node.
    pub initial_elevation: Vec<f64>,
    /// Processes executed in pipeline order each step, after uplift.
    pub processes: Vec<Box<dyn Process>>,
    /// Uplift rate field, applied to core nodes each step.
    pub uplift: Uplift,
    /// Step size, in years. Fixed for the whole run.
    pub dt: f64,
}

impl SimulationConfig {
    /// Validate all structural invariants.
    ///
    /// Checks performed (all at startup, not per-step):
    ///
    /// 1. `dt` is finite and positive.
    /// 2. The pipeline and field list are non-empty.
    /// 3. The uplift target and every process field reference is defined.
    /// 4. `dt <= min(max_dt)` across all processes on this grid.
    /// 5. The uplift field matches the grid's shape and is finite.
    /// 6. The initial elevation covers exactly one value per node.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        if self.processes.is_empty() {
            return Err(ConfigError::EmptyPipeline);
        }
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }

        let defined = |field: FieldId| (field.0 as usize) < self.fields.len();

        if !defined(self.elevation_field) {
            return Err(ConfigError::UndefinedField {
                process: "driver".to_string(),
                field: self.elevation_field,
            });
        }
        for process in &self.processes {
            for field in process.reads().into_iter().chain(process.writes()) {
                if !defined(field) {
                    return Err(ConfigError::UndefinedField {
                        process: process.name().to_string(),
                        field,
                    });
                }
            }
        }

        let mut min_max_dt = f64::INFINITY;
        let mut constraining = String::new();
        for process in &self.processes {
            if let Some(max) = process.max_dt(self.grid.as_ref()) {
                if !max.is_finite() || max <= 0.0 {
                    return Err(ConfigError::InvalidMaxDt {
                        process: process.name().to_string(),
                        value: max,
                    });
                }
                if max < min_max_dt {
                    min_max_dt = max;
                    constraining = process.name().to_string();
                }
            }
        }
        if self.dt > min_max_dt {
            return Err(ConfigError::DtTooLarge {
                configured_dt: self.dt,
                max_supported: min_max_dt,
                constraining_process: constraining,
            });
        }

        self.uplift
            .validate(self.grid.node_count())
            .map_err(|reason| ConfigError::InvalidUplift { reason })?;

        if self.initial_elevation.len() != self.grid.node_count() {
            return Err(ConfigError::InitialElevationMismatch {
                expected: self.grid.node_count(),
                got: self.initial_elevation.len(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationConfig")
            .field("grid_node_count", &self.grid.node_count())
            .field("fields", &self.fields.len())
            .field("elevation_field", &self.elevation_field)
            .field("processes", &self.processes.len())
            .field("uplift", &self.uplift)
            .field("dt", &self.dt)
            .finish()
    }
}
