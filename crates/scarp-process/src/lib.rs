//! Surface-process operators for the Scarp harness.
//!
//! Defines the [`Process`] trait — the "advance state by one step"
//! contract the driver invokes in pipeline order each step — together
//! with the two implemented operators ([`LinearDiffusion`] hillslope
//! transport and [`StreamPowerIncision`] fluvial erosion), the
//! [`FlowRouter`] external-collaborator contract, and the closed-form
//! [`HillslopeSteadyState`] reference profile.
//!
//! # Pipeline order (each step)
//!
//! The driver applies uplift to core nodes first, then runs each
//! process in registration order. Reversing that order changes the
//! numerical result; the driver owns the ordering, not the processes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytic;
pub mod context;
pub mod diffusion;
pub mod flow;
pub mod process;
pub mod stream_power;

pub use analytic::HillslopeSteadyState;
pub use context::StepContext;
pub use diffusion::LinearDiffusion;
pub use flow::{FlowFrame, FlowRouter};
pub use process::Process;
pub use stream_power::StreamPowerIncision;
