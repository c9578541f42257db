//! One-dimensional ridge transect grid.

use crate::error::GridError;
use crate::grid::{Grid, NodeStatus};
use scarp_core::NodeId;
use smallvec::SmallVec;

/// A one-dimensional transect across a symmetric ridge.
///
/// Nodes sit at uniform `spacing` along the transect; node `i` lies at
/// offset `i * spacing` from the left end. The two end nodes are
/// fixed-value base level, every other node is core. The drainage
/// divide sits at the transect midpoint, which makes this grid the
/// natural domain for the closed-form steady-state hillslope profile.
///
/// # Examples
///
/// ```
/// use scarp_core::NodeId;
/// use scarp_grid::{Grid, NodeStatus, RidgeProfile};
///
/// let grid = RidgeProfile::new(101, 2.0).unwrap();
/// assert_eq!(grid.node_count(), 101);
/// assert_eq!(grid.status(NodeId(0)), NodeStatus::FixedValue);
/// assert_eq!(grid.status(NodeId(50)), NodeStatus::Core);
/// assert_eq!(grid.half_width(), 100.0);
/// assert_eq!(grid.divide_offset(), 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct RidgeProfile {
    len: u32,
    spacing: f64,
}

impl RidgeProfile {
    /// Minimum node count: two fixed ends plus at least one core node.
    pub const MIN_NODES: u32 = 3;

    /// Create a transect with `len` nodes at uniform `spacing` metres.
    ///
    /// Returns `Err(GridError::TooFewNodes)` if `len < 3`, or
    /// `Err(GridError::InvalidSpacing)` if `spacing` is not finite and
    /// positive.
    pub fn new(len: u32, spacing: f64) -> Result<Self, GridError> {
        if len < Self::MIN_NODES {
            return Err(GridError::TooFewNodes {
                got: len,
                min: Self::MIN_NODES,
            });
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(GridError::InvalidSpacing { value: spacing });
        }
        Ok(Self { len, spacing })
    }

    /// Number of nodes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Always returns `false` — construction rejects short transects.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Distance of a node from the left end of the transect, in metres.
    pub fn offset(&self, node: NodeId) -> f64 {
        node.index() as f64 * self.spacing
    }

    /// Half-width of the domain: distance from either end to the divide.
    pub fn half_width(&self) -> f64 {
        (self.len - 1) as f64 * self.spacing / 2.0
    }

    /// Offset of the drainage divide — the transect midpoint.
    pub fn divide_offset(&self) -> f64 {
        self.half_width()
    }
}

impl Grid for RidgeProfile {
    fn node_count(&self) -> usize {
        self.len as usize
    }

    fn spacing(&self) -> f64 {
        self.spacing
    }

    fn status(&self, node: NodeId) -> NodeStatus {
        let i = node.0;
        if i == 0 || i >= self.len - 1 {
            NodeStatus::FixedValue
        } else {
            NodeStatus::Core
        }
    }

    fn core_nodes(&self) -> Vec<NodeId> {
        (1..self.len - 1).map(NodeId).collect()
    }

    fn neighbours(&self, node: NodeId) -> SmallVec<[NodeId; 8]> {
        let i = node.0;
        if i >= self.len {
            return SmallVec::new();
        }
        let mut result = SmallVec::new();
        if i > 0 {
            result.push(NodeId(i - 1));
        }
        if i < self.len - 1 {
            result.push(NodeId(i + 1));
        }
        result
    }

    fn position(&self, node: NodeId) -> [f64; 2] {
        [self.offset(node), 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Constructor ─────────────────────────────────────────────

    #[test]
    fn new_rejects_too_few_nodes() {
        assert!(matches!(
            RidgeProfile::new(2, 1.0),
            Err(GridError::TooFewNodes { got: 2, min: 3 })
        ));
        assert!(RidgeProfile::new(3, 1.0).is_ok());
    }

    #[test]
    fn new_rejects_bad_spacing() {
        assert!(matches!(
            RidgeProfile::new(5, 0.0),
            Err(GridError::InvalidSpacing { .. })
        ));
        assert!(RidgeProfile::new(5, -1.0).is_err());
        assert!(RidgeProfile::new(5, f64::NAN).is_err());
        assert!(RidgeProfile::new(5, f64::INFINITY).is_err());
    }

    // ── Classification ──────────────────────────────────────────

    #[test]
    fn ends_are_fixed_interior_is_core() {
        let g = RidgeProfile::new(5, 1.0).unwrap();
        assert_eq!(g.status(NodeId(0)), NodeStatus::FixedValue);
        assert_eq!(g.status(NodeId(4)), NodeStatus::FixedValue);
        for i in 1..4 {
            assert_eq!(g.status(NodeId(i)), NodeStatus::Core);
        }
    }

    #[test]
    fn core_nodes_exclude_boundaries() {
        let g = RidgeProfile::new(5, 1.0).unwrap();
        assert_eq!(g.core_nodes(), vec![NodeId(1), NodeId(2), NodeId(3)]);
    }

    // ── Adjacency ───────────────────────────────────────────────

    #[test]
    fn interior_node_has_two_neighbours() {
        let g = RidgeProfile::new(5, 1.0).unwrap();
        let n = g.neighbours(NodeId(2));
        assert_eq!(n.as_slice(), &[NodeId(1), NodeId(3)]);
    }

    #[test]
    fn end_nodes_have_one_neighbour() {
        let g = RidgeProfile::new(5, 1.0).unwrap();
        assert_eq!(g.neighbours(NodeId(0)).as_slice(), &[NodeId(1)]);
        assert_eq!(g.neighbours(NodeId(4)).as_slice(), &[NodeId(3)]);
    }

    #[test]
    fn out_of_range_node_has_no_neighbours() {
        let g = RidgeProfile::new(5, 1.0).unwrap();
        assert!(g.neighbours(NodeId(5)).is_empty());
    }

    // ── Geometry ────────────────────────────────────────────────

    #[test]
    fn offsets_and_divide() {
        let g = RidgeProfile::new(101, 2.0).unwrap();
        assert_eq!(g.offset(NodeId(0)), 0.0);
        assert_eq!(g.offset(NodeId(100)), 200.0);
        assert_eq!(g.half_width(), 100.0);
        assert_eq!(g.divide_offset(), 100.0);
        assert_eq!(g.position(NodeId(50)), [100.0, 0.0]);
    }

    #[test]
    fn downcast_from_dyn_grid() {
        let g: Box<dyn Grid> = Box::new(RidgeProfile::new(5, 1.0).unwrap());
        let profile = g.downcast_ref::<RidgeProfile>().unwrap();
        assert_eq!(profile.len(), 5);
    }

    // ── Properties ──────────────────────────────────────────────

    proptest! {
        #[test]
        fn neighbours_symmetric(len in 3u32..200, i in 0u32..200) {
            let i = i % len;
            let g = RidgeProfile::new(len, 1.0).unwrap();
            for nb in g.neighbours(NodeId(i)) {
                prop_assert!(
                    g.neighbours(nb).contains(&NodeId(i)),
                    "neighbour symmetry violated between {i} and {nb}",
                );
            }
        }

        #[test]
        fn core_nodes_all_have_two_neighbours(len in 3u32..200) {
            let g = RidgeProfile::new(len, 1.0).unwrap();
            for node in g.core_nodes() {
                prop_assert_eq!(g.neighbours(node).len(), 2);
            }
        }

        #[test]
        fn divide_is_equidistant_from_ends(len in 3u32..200, spacing in 0.1f64..100.0) {
            let g = RidgeProfile::new(len, spacing).unwrap();
            let last = NodeId(len - 1);
            let total = g.offset(last);
            prop_assert!((g.divide_offset() - total / 2.0).abs() < 1e-9);
        }
    }
}
