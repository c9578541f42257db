//! Scarp: a deterministic landscape-evolution simulation harness.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Scarp sub-crates. For most users, adding `scarp` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! Drive a uniformly uplifting ridge toward its diffusive steady state:
//!
//! ```rust
//! use scarp::prelude::*;
//!
//! // 101-node transect at 2 m spacing: half-width H = 100 m.
//! let grid = RidgeProfile::new(101, 2.0).unwrap();
//!
//! // Derive the step once from the diffusion stability criterion.
//! let diffusivity = 0.01;
//! let dt = 0.5 * LinearDiffusion::stable_dt(grid.spacing(), diffusivity);
//!
//! let config = SimulationConfig {
//!     grid: Box::new(grid.clone()),
//!     fields: vec![FieldDef::with_units("topographic_elevation", "m")],
//!     elevation_field: FieldId(0),
//!     initial_elevation: vec![0.0; 101],
//!     processes: vec![Box::new(
//!         LinearDiffusion::builder()
//!             .field(FieldId(0))
//!             .diffusivity(diffusivity)
//!             .build()
//!             .unwrap(),
//!     )],
//!     uplift: Uplift::Uniform(1e-4),
//!     dt,
//! };
//!
//! let mut sim = Simulation::new(config).unwrap();
//! sim.run_for(50_000.0).unwrap();
//!
//! // The divide rises; the fixed boundaries hold base level.
//! assert!(sim.elevation()[50] > 0.0);
//! assert_eq!(sim.elevation()[0], 0.0);
//!
//! // The closed-form steady state is the reference for convergence.
//! let steady = HillslopeSteadyState::new(1e-4, diffusivity).unwrap();
//! assert!((steady.peak(grid.half_width()) - 50.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `scarp-core` | IDs, fields, uplift, core traits, errors |
//! | [`grid`] | `scarp-grid` | The `Grid` trait and the ridge transect |
//! | [`process`] | `scarp-process` | Operators, router contract, analytics |
//! | [`engine`] | `scarp-engine` | Driver, clock, steady-state detection, export |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`scarp-core`).
///
/// Contains field definitions and the [`types::FieldStore`], the
/// [`types::Uplift`] field, error types, and the field access traits.
pub use scarp_core as types;

/// Spatial domain trait and backends (`scarp-grid`).
///
/// Provides the [`grid::Grid`] trait and the concrete
/// [`grid::RidgeProfile`] transect.
pub use scarp_grid as grid;

/// Surface-process operators (`scarp-process`).
///
/// The [`process::Process`] trait is the main extension point;
/// [`process::LinearDiffusion`] and [`process::StreamPowerIncision`]
/// are the built-in operators, and [`process::FlowRouter`] is the
/// external routing contract.
pub use scarp_process as process;

/// The time-stepping driver (`scarp-engine`).
///
/// [`engine::Simulation`] owns the state and advances it; supporting
/// modules cover configuration, initial surfaces, steady-state
/// detection, and text export.
pub use scarp_engine as engine;

/// Common imports for typical Scarp usage.
///
/// ```rust
/// use scarp::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use scarp_core::{
        FieldDef, FieldId, FieldReader, FieldStore, FieldWriter, NodeId, StepId, Uplift,
    };

    // Errors
    pub use scarp_core::{FieldError, ProcessError, StepError};
    pub use scarp_engine::ConfigError;

    // Grid
    pub use scarp_grid::{Grid, NodeStatus, RidgeProfile};

    // Processes
    pub use scarp_process::{
        FlowFrame, FlowRouter, HillslopeSteadyState, LinearDiffusion, Process, StepContext,
        StreamPowerIncision,
    };

    // Engine
    pub use scarp_engine::{
        run_to_steady, RunSummary, SimClock, Simulation, SimulationConfig, Snapshot,
        SteadyStateCheck, SteadyStateReport, StepMetrics,
    };
}
