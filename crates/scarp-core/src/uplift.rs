//! The externally imposed uplift field.

use crate::id::NodeId;

/// Rate of vertical land-surface rise, per node or uniform.
///
/// Read-only during a run; the driver applies `rate * dt` to every core
/// node at the start of each step, before any erosion or diffusion.
/// Replaceable between runs. Negative rates (subsidence) are permitted.
///
/// # Examples
///
/// ```
/// use scarp_core::{NodeId, Uplift};
///
/// let uniform = Uplift::Uniform(1e-4);
/// assert_eq!(uniform.rate(NodeId(3)), 1e-4);
///
/// let varying = Uplift::PerNode(vec![0.0, 2e-4, 0.0]);
/// assert_eq!(varying.rate(NodeId(1)), 2e-4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Uplift {
    /// One rate applied to every core node.
    Uniform(f64),
    /// One rate per node, indexed by [`NodeId`].
    PerNode(Vec<f64>),
}

impl Uplift {
    /// The uplift rate at a node.
    ///
    /// Out-of-range nodes of a `PerNode` field report zero; shape
    /// mismatches are rejected up front by [`Uplift::validate`].
    pub fn rate(&self, node: NodeId) -> f64 {
        match self {
            Self::Uniform(rate) => *rate,
            Self::PerNode(rates) => rates.get(node.index()).copied().unwrap_or(0.0),
        }
    }

    /// Check shape and finiteness against a grid's node count.
    pub fn validate(&self, node_count: usize) -> Result<(), String> {
        match self {
            Self::Uniform(rate) => {
                if !rate.is_finite() {
                    return Err(format!("uniform uplift rate must be finite, got {rate}"));
                }
            }
            Self::PerNode(rates) => {
                if rates.len() != node_count {
                    return Err(format!(
                        "per-node uplift has {} rates, grid has {} nodes",
                        rates.len(),
                        node_count
                    ));
                }
                for (i, rate) in rates.iter().enumerate() {
                    if !rate.is_finite() {
                        return Err(format!("uplift rate at node {i} must be finite, got {rate}"));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_rate_everywhere() {
        let u = Uplift::Uniform(0.001);
        assert_eq!(u.rate(NodeId(0)), 0.001);
        assert_eq!(u.rate(NodeId(999)), 0.001);
    }

    #[test]
    fn per_node_out_of_range_is_zero() {
        let u = Uplift::PerNode(vec![1.0, 2.0]);
        assert_eq!(u.rate(NodeId(5)), 0.0);
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let u = Uplift::PerNode(vec![1.0, 2.0]);
        assert!(u.validate(3).is_err());
        assert!(u.validate(2).is_ok());
    }

    #[test]
    fn validate_rejects_non_finite() {
        assert!(Uplift::Uniform(f64::NAN).validate(10).is_err());
        assert!(Uplift::PerNode(vec![0.0, f64::INFINITY]).validate(2).is_err());
        assert!(Uplift::Uniform(-1e-4).validate(10).is_ok());
    }
}
