//! The [`FlowRouter`] external-collaborator contract.
//!
//! Flow routing and drainage-area accumulation are not implemented in
//! this workspace. The fluvial harness consumes them through this
//! narrow contract: a router reads the elevation field and produces,
//! per node, a downstream receiver, an accumulated drainage area, and
//! the steepest downslope gradient. `scarp-test-utils` provides a
//! deterministic scripted router for tests and benches.

use scarp_core::{NodeId, ProcessError};
use scarp_grid::Grid;

/// Per-node routing output for one step.
///
/// All three vectors are indexed by [`NodeId`] in canonical node order.
/// A node with nowhere to drain (an outlet or boundary) lists itself as
/// its receiver and a non-positive steepest slope.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowFrame {
    /// Downstream receiver of each node.
    pub receiver: Vec<NodeId>,
    /// Accumulated drainage area of each node, in m².
    pub drainage_area: Vec<f64>,
    /// Steepest downslope gradient of each node (dimensionless).
    pub steepest_slope: Vec<f64>,
}

impl FlowFrame {
    /// Check the frame's shape and content against a grid's node count.
    ///
    /// Verifies that all three vectors cover every node, receivers are
    /// in range, drainage areas are finite and non-negative, and slopes
    /// are finite.
    pub fn validate(&self, node_count: usize) -> Result<(), ProcessError> {
        if self.receiver.len() != node_count
            || self.drainage_area.len() != node_count
            || self.steepest_slope.len() != node_count
        {
            return Err(ProcessError::MalformedFlowFrame {
                reason: format!(
                    "frame covers {}/{}/{} nodes, grid has {node_count}",
                    self.receiver.len(),
                    self.drainage_area.len(),
                    self.steepest_slope.len(),
                ),
            });
        }
        for (i, recv) in self.receiver.iter().enumerate() {
            if recv.index() >= node_count {
                return Err(ProcessError::MalformedFlowFrame {
                    reason: format!("node {i} drains to out-of-range node {recv}"),
                });
            }
        }
        for (i, area) in self.drainage_area.iter().enumerate() {
            if !area.is_finite() || *area < 0.0 {
                return Err(ProcessError::MalformedFlowFrame {
                    reason: format!("drainage area at node {i} must be finite and >= 0, got {area}"),
                });
            }
        }
        for (i, slope) in self.steepest_slope.iter().enumerate() {
            if !slope.is_finite() {
                return Err(ProcessError::MalformedFlowFrame {
                    reason: format!("steepest slope at node {i} must be finite, got {slope}"),
                });
            }
        }
        Ok(())
    }
}

/// External flow-routing collaborator.
///
/// Invoked exactly once per step by
/// [`StreamPowerIncision`](crate::StreamPowerIncision), before any
/// erosion is applied. Implementations must be deterministic for
/// identical `(grid, elevation)` inputs; routers needing internal
/// caches should use interior mutability.
pub trait FlowRouter: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Route flow over the given elevation field.
    fn route(&self, grid: &dyn Grid, elevation: &[f64]) -> Result<FlowFrame, ProcessError>;
}
