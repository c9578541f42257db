//! Spatial domain abstractions for Scarp simulations.
//!
//! This crate defines the [`Grid`] trait — the narrow contract through
//! which the driver and all processes see the spatial domain: node
//! count, node spacing, core/boundary classification, adjacency, and
//! node positions — along with the concrete [`RidgeProfile`]
//! one-dimensional transect backend used by the hillslope-diffusion
//! harness and its analytical check.
//!
//! Raster grids, flow routing, and channel metrics are deliberately not
//! provided here; they remain external collaborators reached through
//! the contracts in `scarp-process`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod profile;

pub use error::GridError;
pub use grid::{Grid, NodeStatus};
pub use profile::RidgeProfile;
