//! Time-stepping simulation driver for Scarp landscape-evolution runs.
//!
//! [`Simulation`] owns the elevation field, the uplift field, the clock,
//! and the process pipeline, and advances them in a fixed order each
//! step: uplift on core nodes, then every process in registration
//! order, then the clock. It is re-entrant — `run` may be called
//! repeatedly to continue a run, `reset` restores the captured initial
//! state — and strictly single-threaded.
//!
//! Supporting modules: [`config`] (validated construction input),
//! [`clock`] (monotonic simulated time), [`metrics`] (per-step wall
//! timings), [`surface`] (flat and seeded-noise initial elevations),
//! [`steady`] (steady-state detection against a reference profile),
//! and [`export`] (text tables of node fields).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod driver;
pub mod export;
pub mod metrics;
pub mod steady;
pub mod surface;

pub use clock::{steps_for, SimClock};
pub use config::{ConfigError, SimulationConfig};
pub use driver::{Simulation, Snapshot};
pub use metrics::{RunSummary, StepMetrics};
pub use steady::{run_to_steady, SteadyStateCheck, SteadyStateReport};
