//! The time-stepping [`Simulation`] driver.

use std::time::Instant;

use scarp_core::{FieldError, FieldId, FieldStore, StepError, StepId, Uplift};
use scarp_grid::Grid;
use scarp_process::{Process, StepContext};

use crate::clock::{steps_for, SimClock};
use crate::config::{ConfigError, SimulationConfig};
use crate::metrics::{RunSummary, StepMetrics};

/// An owned copy of the simulation's fields and clock at one instant.
///
/// Captured with [`Simulation::snapshot`], typically between `run`
/// calls (e.g. at the midpoint of an experiment) for later comparison
/// or export. Read-only with respect to the live simulation.
#[derive(Clone, Debug)]
pub struct Snapshot {
    fields: FieldStore,
    step: StepId,
    elapsed: f64,
}

impl Snapshot {
    /// The captured fields.
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// A captured field's data, by name.
    pub fn field(&self, name: &str) -> Result<&[f64], FieldError> {
        self.fields.read_by_name(name)
    }

    /// Completed steps at capture time.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Simulated time at capture time, in years.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Single-threaded time-stepping driver.
///
/// Owns all simulation state — the field store, the uplift field, the
/// clock, and the process pipeline — and advances them synchronously.
/// Each step executes, in this order: (a) uplift on every core node of
/// the elevation field, (b) every process in registration order,
/// (c) the clock. Reversing (a) and (b) changes the numerical result;
/// the driver owns the ordering.
///
/// The driver is re-entrant: `run` continues from the current state, so
/// capturing a midpoint is just two `run` calls with a
/// [`Simulation::snapshot`] between them. [`Simulation::reset`]
/// restores the state captured at construction.
///
/// A process failure aborts the step with the clock un-advanced and
/// surfaces as [`StepError::ProcessFailed`]; there is no recovery
/// layer, rollback, or retry.
pub struct Simulation {
    grid: Box<dyn Grid>,
    fields: FieldStore,
    baseline: FieldStore,
    processes: Vec<Box<dyn Process>>,
    uplift: Uplift,
    elevation: FieldId,
    core: Vec<scarp_core::NodeId>,
    dt: f64,
    clock: SimClock,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Construct a simulation from a validated configuration.
    ///
    /// Registers the configured fields, loads the initial elevation,
    /// and captures the result as the [`reset`](Simulation::reset)
    /// baseline. Consumes the config.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut fields = FieldStore::new(config.grid.node_count());
        for def in &config.fields {
            fields.register(def.clone())?;
        }
        fields.set(config.elevation_field, &config.initial_elevation)?;

        let core = config.grid.core_nodes();
        let baseline = fields.clone();

        Ok(Self {
            grid: config.grid,
            fields,
            baseline,
            processes: config.processes,
            uplift: config.uplift,
            elevation: config.elevation_field,
            core,
            dt: config.dt,
            clock: SimClock::new(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Execute one step: uplift, then the pipeline, then the clock.
    ///
    /// On failure the clock is left un-advanced and the error names the
    /// failing process.
    pub fn step(&mut self) -> Result<(), StepError> {
        let step_start = Instant::now();
        let executing = self.clock.step().next();

        // (a) Uplift on core nodes, before any erosion or diffusion.
        let uplift_start = Instant::now();
        let buf = self
            .fields
            .write(self.elevation)
            .expect("elevation field validated at construction");
        for node in &self.core {
            buf[node.index()] += self.uplift.rate(*node) * self.dt;
        }
        let uplift_us = uplift_start.elapsed().as_micros() as u64;

        // (b) Process pipeline, in registration order.
        let mut process_us = Vec::with_capacity(self.processes.len());
        for process in &self.processes {
            let process_start = Instant::now();
            let mut ctx =
                StepContext::new(&mut self.fields, self.grid.as_ref(), executing, self.dt);
            process
                .step(&mut ctx)
                .map_err(|reason| StepError::ProcessFailed {
                    name: process.name().to_string(),
                    reason,
                })?;
            process_us.push((
                process.name().to_string(),
                process_start.elapsed().as_micros() as u64,
            ));
        }

        // (c) Clock.
        self.clock.advance(self.dt);

        self.last_metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            uplift_us,
            process_us,
        };
        Ok(())
    }

    /// Execute `steps` iterations. `run(0)` is a no-op.
    pub fn run(&mut self, steps: u64) -> Result<RunSummary, StepError> {
        let run_start = Instant::now();
        let time_before = self.clock.elapsed();
        for _ in 0..steps {
            self.step()?;
        }
        Ok(RunSummary {
            steps_run: steps,
            simulated_time: self.clock.elapsed() - time_before,
            total_us: run_start.elapsed().as_micros() as u64,
        })
    }

    /// Execute `floor(duration / dt)` iterations.
    pub fn run_for(&mut self, duration: f64) -> Result<RunSummary, StepError> {
        self.run(steps_for(duration, self.dt))
    }

    /// Step until `done` returns true or `max_steps` is exhausted.
    ///
    /// The predicate is evaluated after each step. Returns the summary
    /// of the steps actually run; callers can compare `steps_run`
    /// against `max_steps` to see whether the predicate was met.
    pub fn run_until<F>(&mut self, max_steps: u64, mut done: F) -> Result<RunSummary, StepError>
    where
        F: FnMut(&Simulation) -> bool,
    {
        let run_start = Instant::now();
        let time_before = self.clock.elapsed();
        let mut steps_run = 0;
        while steps_run < max_steps {
            self.step()?;
            steps_run += 1;
            if done(self) {
                break;
            }
        }
        Ok(RunSummary {
            steps_run,
            simulated_time: self.clock.elapsed() - time_before,
            total_us: run_start.elapsed().as_micros() as u64,
        })
    }

    /// Restore the fields captured at construction and zero the clock.
    pub fn reset(&mut self) {
        self.fields = self.baseline.clone();
        self.clock.reset();
        self.last_metrics = StepMetrics::default();
    }

    /// Capture an owned copy of the current fields and clock.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            fields: self.fields.clone(),
            step: self.clock.step(),
            elapsed: self.clock.elapsed(),
        }
    }

    /// Replace the uplift field between runs.
    pub fn set_uplift(&mut self, uplift: Uplift) -> Result<(), ConfigError> {
        uplift
            .validate(self.grid.node_count())
            .map_err(|reason| ConfigError::InvalidUplift { reason })?;
        self.uplift = uplift;
        Ok(())
    }

    /// The current elevation field.
    pub fn elevation(&self) -> &[f64] {
        self.fields
            .read(self.elevation)
            .expect("elevation field validated at construction")
    }

    /// The ID of the elevation field.
    pub fn elevation_field(&self) -> FieldId {
        self.elevation
    }

    /// A field's current data, by name.
    pub fn field(&self, name: &str) -> Result<&[f64], FieldError> {
        self.fields.read_by_name(name)
    }

    /// The field store.
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// Accumulated simulated time, in years.
    pub fn time(&self) -> f64 {
        self.clock.elapsed()
    }

    /// The simulated-time clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// The configured step size, in years.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The spatial domain.
    pub fn grid(&self) -> &dyn Grid {
        self.grid.as_ref()
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scarp_core::{FieldDef, ProcessError};
    use scarp_grid::RidgeProfile;
    use scarp_test_utils::{ConstProcess, FailingProcess};

    const Z: FieldId = FieldId(0);
    const PROBE: FieldId = FieldId(1);

    /// Copies the elevation field into a probe field, recording what
    /// the pipeline sees after the driver's uplift pass.
    struct CopyProcess;

    impl Process for CopyProcess {
        fn name(&self) -> &str {
            "copy_probe"
        }
        fn reads(&self) -> Vec<FieldId> {
            vec![Z]
        }
        fn writes(&self) -> Vec<FieldId> {
            vec![PROBE]
        }
        fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), ProcessError> {
            let z = ctx.read(Z).unwrap().to_vec();
            let probe = ctx.write(PROBE).unwrap();
            probe.copy_from_slice(&z);
            Ok(())
        }
    }

    fn probe_config() -> SimulationConfig {
        SimulationConfig {
            grid: Box::new(RidgeProfile::new(5, 1.0).unwrap()),
            fields: vec![
                FieldDef::with_units("topographic_elevation", "m"),
                FieldDef::named("probe"),
            ],
            elevation_field: Z,
            initial_elevation: vec![0.0; 5],
            processes: vec![Box::new(CopyProcess)],
            uplift: Uplift::Uniform(0.001),
            dt: 10.0,
        }
    }

    // ── Ordering ────────────────────────────────────────────────

    #[test]
    fn uplift_applies_before_pipeline() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        sim.step().unwrap();

        // The probe saw elevation after uplift: 0.001 * 10 on core nodes.
        let probe = sim.field("probe").unwrap();
        assert_eq!(probe[0], 0.0, "boundary is not uplifted");
        assert_eq!(probe[4], 0.0, "boundary is not uplifted");
        for i in 1..4 {
            assert!(
                (probe[i] - 0.01).abs() < 1e-15,
                "core node {i} should read uplifted value, got {}",
                probe[i]
            );
        }
    }

    #[test]
    fn uplift_is_additive_on_core_nodes() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        sim.run(3).unwrap();

        let z = sim.elevation();
        assert_eq!(z[0], 0.0);
        for i in 1..4 {
            assert!((z[i] - 0.03).abs() < 1e-15, "node {i}: {}", z[i]);
        }
    }

    #[test]
    fn per_node_uplift_respected() {
        let mut cfg = probe_config();
        cfg.uplift = Uplift::PerNode(vec![0.0, 0.1, 0.0, 0.2, 0.0]);
        let mut sim = Simulation::new(cfg).unwrap();
        sim.step().unwrap();

        let z = sim.elevation();
        assert!((z[1] - 1.0).abs() < 1e-12);
        assert_eq!(z[2], 0.0);
        assert!((z[3] - 2.0).abs() < 1e-12);
    }

    // ── Re-entrancy ─────────────────────────────────────────────

    #[test]
    fn zero_steps_is_a_no_op() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        let before = sim.elevation().to_vec();

        let summary = sim.run(0).unwrap();

        assert_eq!(summary.steps_run, 0);
        assert_eq!(sim.elevation(), before.as_slice());
        assert_eq!(sim.clock().step(), StepId(0));
        assert_eq!(sim.time(), 0.0);
    }

    #[test]
    fn run_is_reentrant() {
        let mut once = Simulation::new(probe_config()).unwrap();
        once.run(10).unwrap();

        let mut twice = Simulation::new(probe_config()).unwrap();
        twice.run(4).unwrap();
        twice.run(6).unwrap();

        assert_eq!(once.elevation(), twice.elevation());
        assert_eq!(once.time(), twice.time());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        let initial = sim.elevation().to_vec();
        sim.run(5).unwrap();
        assert_ne!(sim.elevation(), initial.as_slice());

        sim.reset();

        assert_eq!(sim.elevation(), initial.as_slice());
        assert_eq!(sim.clock().step(), StepId(0));
        assert_eq!(sim.time(), 0.0);
    }

    #[test]
    fn reset_then_rerun_is_deterministic() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        sim.run(7).unwrap();
        let first = sim.elevation().to_vec();

        sim.reset();
        sim.run(7).unwrap();

        assert_eq!(sim.elevation(), first.as_slice());
    }

    // ── run_for / run_until ─────────────────────────────────────

    #[test]
    fn run_for_uses_floor_of_duration() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        let summary = sim.run_for(35.0).unwrap(); // dt = 10 → 3 steps
        assert_eq!(summary.steps_run, 3);
        assert_eq!(sim.clock().step(), StepId(3));
        assert!((sim.time() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn run_until_stops_at_predicate() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        let summary = sim
            .run_until(100, |sim| sim.elevation()[1] >= 0.045)
            .unwrap();
        assert_eq!(summary.steps_run, 5);
    }

    #[test]
    fn run_until_respects_budget() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        let summary = sim.run_until(3, |_| false).unwrap();
        assert_eq!(summary.steps_run, 3);
        assert_eq!(sim.clock().step(), StepId(3));
    }

    // ── Failure ─────────────────────────────────────────────────

    #[test]
    fn process_failure_aborts_with_name() {
        let mut cfg = probe_config();
        cfg.processes = vec![Box::new(FailingProcess::new("flaky", Z, 2))];
        let mut sim = Simulation::new(cfg).unwrap();

        sim.run(2).unwrap();
        let err = sim.step().unwrap_err();
        match err {
            StepError::ProcessFailed { name, .. } => assert_eq!(name, "flaky"),
        }
        // Clock reflects only the successful steps.
        assert_eq!(sim.clock().step(), StepId(2));
    }

    // ── Snapshots and uplift swaps ──────────────────────────────

    #[test]
    fn snapshot_captures_midpoint() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        sim.run(5).unwrap();
        let mid = sim.snapshot();
        sim.run(5).unwrap();

        assert_eq!(mid.step(), StepId(5));
        assert!((mid.elapsed() - 50.0).abs() < 1e-12);
        assert!((mid.field("topographic_elevation").unwrap()[1] - 0.05).abs() < 1e-12);
        // The live simulation moved on.
        assert!((sim.elevation()[1] - 0.10).abs() < 1e-12);
    }

    #[test]
    fn set_uplift_swaps_between_runs() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        sim.run(1).unwrap();
        sim.set_uplift(Uplift::Uniform(0.0)).unwrap();
        sim.run(1).unwrap();

        assert!((sim.elevation()[1] - 0.01).abs() < 1e-15);
    }

    #[test]
    fn set_uplift_rejects_bad_shape() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        let err = sim.set_uplift(Uplift::PerNode(vec![0.0; 3])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUplift { .. }));
    }

    // ── Metrics ─────────────────────────────────────────────────

    #[test]
    fn metrics_name_each_process() {
        let mut cfg = probe_config();
        cfg.processes = vec![
            Box::new(CopyProcess),
            Box::new(ConstProcess::new("flatten", PROBE, 0.0)),
        ];
        let mut sim = Simulation::new(cfg).unwrap();
        sim.step().unwrap();

        let metrics = sim.last_metrics();
        assert_eq!(metrics.process_us.len(), 2);
        assert_eq!(metrics.process_us[0].0, "copy_probe");
        assert_eq!(metrics.process_us[1].0, "flatten");
    }

    #[test]
    fn summary_accounts_simulated_time() {
        let mut sim = Simulation::new(probe_config()).unwrap();
        let summary = sim.run(4).unwrap();
        assert_eq!(summary.steps_run, 4);
        assert!((summary.simulated_time - 40.0).abs() < 1e-12);
    }
}
