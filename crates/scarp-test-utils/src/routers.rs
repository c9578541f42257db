//! Scripted flow routers standing in for the external routing library.

use scarp_core::{NodeId, ProcessError};
use scarp_grid::Grid;
use scarp_process::{FlowFrame, FlowRouter};

/// A router that returns a clone of a pre-configured frame every step.
///
/// Useful for exercising the stream-power law with exact hand-picked
/// drainage areas and slopes, and for feeding deliberately malformed
/// frames into validation paths.
pub struct ScriptedRouter {
    frame: FlowFrame,
}

impl ScriptedRouter {
    pub fn new(frame: FlowFrame) -> Self {
        Self { frame }
    }
}

impl FlowRouter for ScriptedRouter {
    fn name(&self) -> &str {
        "scripted_router"
    }

    fn route(&self, _grid: &dyn Grid, _elevation: &[f64]) -> Result<FlowFrame, ProcessError> {
        Ok(self.frame.clone())
    }
}

/// A fixed left-draining chain over a one-dimensional transect.
///
/// Not a flow-routing algorithm: the drainage pattern is scripted.
/// Every node drains toward node 0; node `i` receives `node_count - i`
/// upstream nodes (itself included) at `unit_area` m² each, and its
/// steepest slope is the gradient toward its receiver, floored at zero.
pub struct ChainRouter {
    unit_area: f64,
}

impl ChainRouter {
    pub fn new(unit_area: f64) -> Self {
        Self { unit_area }
    }
}

impl FlowRouter for ChainRouter {
    fn name(&self) -> &str {
        "chain_router"
    }

    fn route(&self, grid: &dyn Grid, elevation: &[f64]) -> Result<FlowFrame, ProcessError> {
        let n = grid.node_count();
        if elevation.len() != n {
            return Err(ProcessError::ExecutionFailed {
                reason: format!(
                    "elevation covers {} nodes, grid has {n}",
                    elevation.len()
                ),
            });
        }
        let spacing = grid.spacing();

        let mut receiver = Vec::with_capacity(n);
        let mut drainage_area = Vec::with_capacity(n);
        let mut steepest_slope = Vec::with_capacity(n);

        for i in 0..n {
            let recv = i.saturating_sub(1);
            receiver.push(NodeId(recv as u32));
            drainage_area.push(self.unit_area * (n - i) as f64);
            if i == 0 {
                steepest_slope.push(0.0);
            } else {
                steepest_slope.push(((elevation[i] - elevation[recv]) / spacing).max(0.0));
            }
        }

        Ok(FlowFrame {
            receiver,
            drainage_area,
            steepest_slope,
        })
    }
}

/// A router that always fails, for error-propagation tests.
pub struct FailingRouter {
    reason: String,
}

impl FailingRouter {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl FlowRouter for FailingRouter {
    fn name(&self) -> &str {
        "failing_router"
    }

    fn route(&self, _grid: &dyn Grid, _elevation: &[f64]) -> Result<FlowFrame, ProcessError> {
        Err(ProcessError::ExecutionFailed {
            reason: self.reason.clone(),
        })
    }
}
