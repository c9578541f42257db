//! The core [`Grid`] trait and `dyn Grid` downcast support.

use scarp_core::NodeId;
use smallvec::SmallVec;
use std::any::Any;

/// Classification of a grid node.
///
/// The driver applies uplift only to core nodes; processes hold
/// fixed-value nodes at their current elevation (base level).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    /// An interior node whose elevation evolves each step.
    Core,
    /// A boundary node pinned to its current value.
    FixedValue,
}

/// Central spatial abstraction for Scarp simulations.
///
/// The driver and every process see the spatial domain only through
/// this trait: node count, uniform node spacing, core/boundary
/// classification, adjacency, and node positions. Concrete backends
/// (currently [`RidgeProfile`](crate::RidgeProfile)) implement it to
/// define their topology.
///
/// # Object safety
///
/// This trait is designed for use as `dyn Grid`. Use `downcast_ref`
/// for opt-in specialization on concrete backends (fast stencil paths).
///
/// # Determinism
///
/// `core_nodes` must return nodes in ascending canonical order, and
/// `neighbours` must return a deterministic, backend-defined order.
/// Repeated calls on the same grid must return the same sequences.
pub trait Grid: Any + Send + Sync + 'static {
    /// Total number of nodes in the grid.
    fn node_count(&self) -> usize;

    /// Uniform distance between adjacent nodes, in metres.
    fn spacing(&self) -> f64;

    /// Classification of a node. Out-of-range nodes report
    /// [`NodeStatus::FixedValue`] (nothing ever updates them).
    fn status(&self, node: NodeId) -> NodeStatus;

    /// All core (interior) nodes in ascending order.
    fn core_nodes(&self) -> Vec<NodeId>;

    /// Enumerate the neighbours of a node.
    ///
    /// The `SmallVec<[NodeId; 8]>` avoids heap allocation for common
    /// topologies. Out-of-range nodes have no neighbours.
    fn neighbours(&self, node: NodeId) -> SmallVec<[NodeId; 8]>;

    /// Planar position of a node, `[x, y]` in metres.
    fn position(&self, node: NodeId) -> [f64; 2];
}

impl dyn Grid {
    /// Attempt to downcast a trait object to a concrete grid type.
    ///
    /// This enables opt-in specialization: code that works with
    /// `&dyn Grid` can check for a known backend and use
    /// backend-specific fast paths (direct stencil index arithmetic).
    pub fn downcast_ref<T: Grid>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
