//! Stream-power fluvial incision operator.
//!
//! Detachment-limited erosion following the stream-power law: incision
//! rate proportional to drainage area and slope raised to fixed
//! exponents. Routing is delegated to an external [`FlowRouter`],
//! invoked exactly once per step before any erosion is applied.
//!
//! Constructed via the builder pattern: [`StreamPowerIncision::builder`].

use std::fmt;

use crate::context::StepContext;
use crate::flow::FlowRouter;
use crate::process::Process;
use scarp_core::{FieldId, NodeId, ProcessError};

/// A stream-power incision operator.
///
/// Each step routes flow over the step-start elevation, then lowers
/// every core node by:
///
/// ```text
/// E = max(0, k · A^m · S^n − omega_c)
/// z[i] -= E * dt
/// ```
///
/// where `A` is drainage area, `S` the steepest downslope gradient,
/// `k` the incision coefficient, `m`/`n` the area and slope exponents,
/// and `omega_c` the erosion threshold. Nodes with non-positive slope
/// do not erode, and a node never incises below its receiver within a
/// single step. Fixed-value boundary nodes hold their elevation.
///
/// Optionally republishes the router's drainage area and steepest
/// slope into named fields for visualization and export.
///
/// # Construction
///
/// ```
/// use scarp_core::{FieldId, NodeId, ProcessError};
/// use scarp_grid::Grid;
/// use scarp_process::{FlowFrame, FlowRouter, StreamPowerIncision};
///
/// struct NullRouter;
/// impl FlowRouter for NullRouter {
///     fn name(&self) -> &str { "null" }
///     fn route(&self, grid: &dyn Grid, _z: &[f64]) -> Result<FlowFrame, ProcessError> {
///         let n = grid.node_count();
///         Ok(FlowFrame {
///             receiver: (0..n as u32).map(NodeId).collect(),
///             drainage_area: vec![0.0; n],
///             steepest_slope: vec![0.0; n],
///         })
///     }
/// }
///
/// let prop = StreamPowerIncision::builder()
///     .elevation(FieldId(0))
///     .router(NullRouter)
///     .incision_coefficient(1e-5)
///     .build()
///     .unwrap();
/// # use scarp_process::Process;
/// assert_eq!(prop.name(), "stream_power_incision");
/// ```
pub struct StreamPowerIncision {
    elevation: FieldId,
    router: Box<dyn FlowRouter>,
    k: f64,
    m_exp: f64,
    n_exp: f64,
    threshold: f64,
    area_field: Option<FieldId>,
    slope_field: Option<FieldId>,
}

/// Builder for [`StreamPowerIncision`].
///
/// Required: `elevation`, `router`, and `incision_coefficient`. The
/// exponents default to the classic `m = 0.5`, `n = 1.0`; the erosion
/// threshold defaults to zero.
pub struct StreamPowerIncisionBuilder {
    elevation: Option<FieldId>,
    router: Option<Box<dyn FlowRouter>>,
    k: Option<f64>,
    m_exp: f64,
    n_exp: f64,
    threshold: f64,
    area_field: Option<FieldId>,
    slope_field: Option<FieldId>,
}

impl StreamPowerIncision {
    /// Create a new builder for configuring a `StreamPowerIncision` operator.
    pub fn builder() -> StreamPowerIncisionBuilder {
        StreamPowerIncisionBuilder {
            elevation: None,
            router: None,
            k: None,
            m_exp: 0.5,
            n_exp: 1.0,
            threshold: 0.0,
            area_field: None,
            slope_field: None,
        }
    }

    fn publish(
        &self,
        ctx: &mut StepContext<'_>,
        field: FieldId,
        values: &[f64],
    ) -> Result<(), ProcessError> {
        let out = ctx.write(field).ok_or_else(|| ProcessError::ExecutionFailed {
            reason: format!("field {field} not writable"),
        })?;
        out.copy_from_slice(values);
        Ok(())
    }
}

impl fmt::Debug for StreamPowerIncision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamPowerIncision")
            .field("elevation", &self.elevation)
            .field("router", &self.router.name())
            .field("k", &self.k)
            .field("m_exp", &self.m_exp)
            .field("n_exp", &self.n_exp)
            .field("threshold", &self.threshold)
            .field("area_field", &self.area_field)
            .field("slope_field", &self.slope_field)
            .finish()
    }
}

impl StreamPowerIncisionBuilder {
    /// Set the elevation field to erode.
    pub fn elevation(mut self, field: FieldId) -> Self {
        self.elevation = Some(field);
        self
    }

    /// Set the external flow router invoked each step before erosion.
    pub fn router(mut self, router: impl FlowRouter) -> Self {
        self.router = Some(Box::new(router));
        self
    }

    /// Set the incision coefficient `k`. Must be finite and >= 0.
    pub fn incision_coefficient(mut self, k: f64) -> Self {
        self.k = Some(k);
        self
    }

    /// Set the drainage-area exponent `m` (default 0.5). Must be > 0.
    pub fn area_exponent(mut self, m: f64) -> Self {
        self.m_exp = m;
        self
    }

    /// Set the slope exponent `n` (default 1.0). Must be > 0.
    pub fn slope_exponent(mut self, n: f64) -> Self {
        self.n_exp = n;
        self
    }

    /// Set the erosion threshold `omega_c` (default 0.0). Must be >= 0.
    pub fn threshold(mut self, omega_c: f64) -> Self {
        self.threshold = omega_c;
        self
    }

    /// Republish the router's drainage area into this field each step.
    pub fn area_field(mut self, field: FieldId) -> Self {
        self.area_field = Some(field);
        self
    }

    /// Republish the router's steepest slope into this field each step.
    pub fn slope_field(mut self, field: FieldId) -> Self {
        self.slope_field = Some(field);
        self
    }

    /// Build the operator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `elevation`, `router`, or `incision_coefficient` is not set
    /// - `incision_coefficient` is negative or non-finite
    /// - either exponent is non-finite or <= 0
    /// - `threshold` is negative or non-finite
    pub fn build(self) -> Result<StreamPowerIncision, String> {
        let elevation = self
            .elevation
            .ok_or_else(|| "elevation is required".to_string())?;
        let router = self.router.ok_or_else(|| "router is required".to_string())?;
        let k = self
            .k
            .ok_or_else(|| "incision_coefficient is required".to_string())?;

        if !k.is_finite() || k < 0.0 {
            return Err(format!(
                "incision_coefficient must be finite and >= 0, got {k}"
            ));
        }
        if !self.m_exp.is_finite() || self.m_exp <= 0.0 {
            return Err(format!(
                "area_exponent must be finite and > 0, got {}",
                self.m_exp
            ));
        }
        if !self.n_exp.is_finite() || self.n_exp <= 0.0 {
            return Err(format!(
                "slope_exponent must be finite and > 0, got {}",
                self.n_exp
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(format!(
                "threshold must be finite and >= 0, got {}",
                self.threshold
            ));
        }

        Ok(StreamPowerIncision {
            elevation,
            router,
            k,
            m_exp: self.m_exp,
            n_exp: self.n_exp,
            threshold: self.threshold,
            area_field: self.area_field,
            slope_field: self.slope_field,
        })
    }
}

impl Process for StreamPowerIncision {
    fn name(&self) -> &str {
        "stream_power_incision"
    }

    fn reads(&self) -> Vec<FieldId> {
        vec![self.elevation]
    }

    fn writes(&self) -> Vec<FieldId> {
        let mut w = vec![self.elevation];
        if let Some(f) = self.area_field {
            w.push(f);
        }
        if let Some(f) = self.slope_field {
            w.push(f);
        }
        w
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), ProcessError> {
        let dt = ctx.dt();

        let prev = ctx
            .read(self.elevation)
            .ok_or_else(|| ProcessError::ExecutionFailed {
                reason: format!("field {} not readable", self.elevation),
            })?
            .to_vec();
        if prev.len() != ctx.grid().node_count() {
            return Err(ProcessError::ExecutionFailed {
                reason: format!(
                    "field {} has {} elements, grid has {} nodes",
                    self.elevation,
                    prev.len(),
                    ctx.grid().node_count(),
                ),
            });
        }

        // Route once over the step-start surface, before any erosion.
        let frame = self.router.route(ctx.grid(), &prev)?;
        frame.validate(ctx.grid().node_count())?;

        if let Some(field) = self.area_field {
            self.publish(ctx, field, &frame.drainage_area)?;
        }
        if let Some(field) = self.slope_field {
            self.publish(ctx, field, &frame.steepest_slope)?;
        }

        let core = ctx.grid().core_nodes();
        let out = ctx
            .write(self.elevation)
            .ok_or_else(|| ProcessError::ExecutionFailed {
                reason: format!("field {} not writable", self.elevation),
            })?;

        for node in core {
            let i = node.index();
            let slope = frame.steepest_slope[i];
            if slope <= 0.0 {
                continue;
            }
            let area = frame.drainage_area[i];
            let power = self.k * area.powf(self.m_exp) * slope.powf(self.n_exp);
            let rate = (power - self.threshold).max(0.0);
            if rate == 0.0 {
                continue;
            }
            // Never incise below the receiver within one step; the min
            // guards against a frame whose receiver sits above the node.
            let floor = prev[frame.receiver[i].index()].min(prev[i]);
            out[i] = (prev[i] - rate * dt).max(floor);
        }

        match out.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(ProcessError::NonFiniteValue {
                field: self.elevation,
                node: Some(NodeId(i as u32)),
            }),
            None => Ok(()),
        }
    }
}
