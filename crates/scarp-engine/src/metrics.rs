//! Per-step and per-run wall-clock metrics.
//!
//! [`StepMetrics`] captures timing data for a single step, enabling
//! simple profiling of runs without a logging layer. The driver
//! populates these after each `step()`; consumers read them from the
//! most recent step or the returned [`RunSummary`].

/// Timing metrics collected during a single step.
///
/// All durations are wall-clock microseconds.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Time spent applying uplift to core nodes.
    pub uplift_us: u64,
    /// Per-process execution times: `(name, microseconds)`.
    pub process_us: Vec<(String, u64)>,
}

/// Aggregate outcome of a `run` call.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Number of steps actually executed.
    pub steps_run: u64,
    /// Simulated time advanced by this run, in years.
    pub simulated_time: f64,
    /// Total wall-clock time for the run, in microseconds.
    pub total_us: u64,
}
