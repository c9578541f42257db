//! Initial-surface builders.
//!
//! The classroom initial condition is a flat surface, optionally with
//! small random roughness so drainage has something to organize
//! around. Roughness is drawn from a `ChaCha8Rng` keyed by an explicit
//! seed: identical seeds produce bit-identical surfaces, preserving the
//! driver's determinism guarantee.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A flat surface at `value` metres, one entry per node.
pub fn flat(node_count: usize, value: f64) -> Vec<f64> {
    vec![value; node_count]
}

/// A flat surface at `value` metres with uniform random roughness in
/// `[0, amplitude)` added to every node.
///
/// Deterministic: the same `(node_count, value, amplitude, seed)`
/// always produces the same surface.
pub fn perturbed(node_count: usize, value: f64, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..node_count)
        .map(|_| value + amplitude * rng.random::<f64>())
        .collect()
}
