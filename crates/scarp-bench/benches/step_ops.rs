//! Criterion micro-benchmarks for driver step throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scarp_bench::{fluvial_profile, hillslope_profile};
use scarp_engine::Simulation;

/// Benchmark: 100 diffusion steps over a 10K-node transect.
fn bench_hillslope_steps_10k(c: &mut Criterion) {
    c.bench_function("hillslope_steps_10k", |b| {
        b.iter_batched(
            || Simulation::new(hillslope_profile(10_001)).unwrap(),
            |mut sim| {
                sim.run(100).unwrap();
                black_box(sim.elevation()[5_000]);
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: 100 stream-power steps over a 1K-node chain.
fn bench_fluvial_steps_1k(c: &mut Criterion) {
    c.bench_function("fluvial_steps_1k", |b| {
        b.iter_batched(
            || Simulation::new(fluvial_profile(1_001)).unwrap(),
            |mut sim| {
                sim.run(100).unwrap();
                black_box(sim.elevation()[500]);
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_hillslope_steps_10k, bench_fluvial_steps_1k);
criterion_main!(benches);
