//! Benchmark profiles for the Scarp harness.
//!
//! Provides pre-built [`SimulationConfig`] profiles for benchmarking
//! and examples:
//!
//! - [`hillslope_profile`]: diffusing ridge under uniform uplift
//! - [`fluvial_profile`]: stream-power incision over a scripted chain

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use scarp_core::{FieldDef, FieldId, Uplift};
use scarp_engine::SimulationConfig;
use scarp_grid::RidgeProfile;
use scarp_process::{LinearDiffusion, StreamPowerIncision};
use scarp_test_utils::ChainRouter;

/// Build a hillslope-diffusion profile: `nodes` transect nodes at 2 m
/// spacing, D = 0.01 m²/yr, U = 1e-4 m/yr, dt at half the stability
/// bound.
pub fn hillslope_profile(nodes: u32) -> SimulationConfig {
    let spacing = 2.0;
    let diffusivity = 0.01;
    SimulationConfig {
        grid: Box::new(RidgeProfile::new(nodes, spacing).unwrap()),
        fields: vec![FieldDef::with_units("topographic_elevation", "m")],
        elevation_field: FieldId(0),
        initial_elevation: vec![0.0; nodes as usize],
        processes: vec![Box::new(
            LinearDiffusion::builder()
                .field(FieldId(0))
                .diffusivity(diffusivity)
                .build()
                .unwrap(),
        )],
        uplift: Uplift::Uniform(1e-4),
        dt: 0.5 * LinearDiffusion::stable_dt(spacing, diffusivity),
    }
}

/// Build a fluvial-incision profile: `nodes` chain nodes at 100 m
/// spacing, K = 1e-5, classic exponents, dt = 500 yr.
pub fn fluvial_profile(nodes: u32) -> SimulationConfig {
    SimulationConfig {
        grid: Box::new(RidgeProfile::new(nodes, 100.0).unwrap()),
        fields: vec![
            FieldDef::with_units("topographic_elevation", "m"),
            FieldDef::with_units("drainage_area", "m^2"),
            FieldDef::named("steepest_slope"),
        ],
        elevation_field: FieldId(0),
        initial_elevation: vec![0.0; nodes as usize],
        processes: vec![Box::new(
            StreamPowerIncision::builder()
                .elevation(FieldId(0))
                .router(ChainRouter::new(1e4))
                .incision_coefficient(1e-5)
                .area_field(FieldId(1))
                .slope_field(FieldId(2))
                .build()
                .unwrap(),
        )],
        uplift: Uplift::Uniform(1e-4),
        dt: 500.0,
    }
}
