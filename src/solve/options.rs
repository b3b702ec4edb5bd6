//! Options, method selection and output grids for solve_ivp

use bon::Builder;

use crate::{
    Float,
    core::tolerance::Tolerance,
    error::Error,
    methods::{DOP853, DOPRI5, RK23, tableau::ButcherTableau},
};

/// Solver method selection (roughly mirroring scipy.integrate.solve_ivp)
#[derive(Clone, Copy, Debug, Default)]
pub enum Method {
    /// Bogacki–Shampine 3(2) adaptive RK
    RK23,
    /// Dormand–Prince 5(4) adaptive RK
    RK45,
    /// Dormand–Prince 8(5,3) high-order adaptive RK
    #[default]
    DOP853,
    /// User supplied embedded pair, validated when a session is created.
    Custom(&'static ButcherTableau),
}

impl Method {
    pub fn tableau(&self) -> &'static ButcherTableau {
        match self {
            Method::RK23 => &RK23,
            Method::RK45 => &DOPRI5,
            Method::DOP853 => &DOP853,
            Method::Custom(tableau) => tableau,
        }
    }
}

/// Largest number of points a uniform output grid may expand to.
pub const MAX_GRID_POINTS: usize = 100_000_000;

/// Times at which the solution is reported.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputGrid {
    /// `t0, t0 + dt, t0 + 2dt, ...`, always ending exactly at the final time.
    Uniform(Float),
    /// Explicit, non-decreasing times inside the integration span.
    Times(Vec<Float>),
}

impl OutputGrid {
    pub fn uniform(dt: Float) -> Self {
        OutputGrid::Uniform(dt)
    }

    pub fn times(times: impl Into<Vec<Float>>) -> Self {
        OutputGrid::Times(times.into())
    }

    /// Expand the grid over `[t0, tf]`.
    pub(crate) fn resolve(&self, t0: Float, tf: Float) -> Result<Vec<Float>, Error> {
        match self {
            OutputGrid::Uniform(dt) => {
                let dt = *dt;
                if !(dt.is_finite() && dt > 0.0) {
                    return Err(Error::InvalidOutputGrid(format!(
                        "spacing must be positive and finite (got {})",
                        dt
                    )));
                }
                // Small slack so that e.g. 100 / 0.1 counts 1000 intervals.
                let intervals = ((tf - t0) / dt * (1.0 + 4.0 * Float::EPSILON)).floor();
                if !(intervals.is_finite() && intervals < MAX_GRID_POINTS as Float) {
                    return Err(Error::InvalidOutputGrid(format!(
                        "spacing {} gives more than {} points on [{}, {}]",
                        dt, MAX_GRID_POINTS, t0, tf
                    )));
                }
                let n = intervals as usize;
                let mut times: Vec<Float> = (0..=n).map(|i| (t0 + i as Float * dt).min(tf)).collect();
                let snap = 8.0 * Float::EPSILON * tf.abs().max(1.0);
                match times.last_mut() {
                    Some(last) if (tf - *last).abs() <= snap => *last = tf,
                    _ => times.push(tf),
                }
                Ok(times)
            }
            OutputGrid::Times(times) => {
                if let Some(&t) = times.iter().find(|t| !t.is_finite()) {
                    return Err(Error::InvalidOutputGrid(format!("non-finite output time {}", t)));
                }
                if times.windows(2).any(|w| w[1] < w[0]) {
                    return Err(Error::InvalidOutputGrid("output times must be non-decreasing".into()));
                }
                if let Some(&t) = times.iter().find(|&&t| t < t0 || t > tf) {
                    return Err(Error::InvalidOutputGrid(format!(
                        "output time {} outside [{}, {}]",
                        t, t0, tf
                    )));
                }
                Ok(times.clone())
            }
        }
    }
}

impl From<Float> for OutputGrid {
    fn from(dt: Float) -> Self {
        OutputGrid::Uniform(dt)
    }
}

impl From<Vec<Float>> for OutputGrid {
    fn from(times: Vec<Float>) -> Self {
        OutputGrid::Times(times)
    }
}

impl From<&[Float]> for OutputGrid {
    fn from(times: &[Float]) -> Self {
        OutputGrid::Times(times.to_vec())
    }
}

/// Options for solve_ivp similar to SciPy
///
/// ```
/// use dense_ivp::prelude::*;
///
/// let options = IVPOptions::builder()
///     .method(Method::RK45)
///     .rtol(1e-8)
///     .atol(vec![1e-10, 1e-6])
///     .saveat(0.1)
///     .build();
/// assert_eq!(options.nmax, 100_000);
/// ```
#[derive(Builder, Clone, Debug)]
pub struct IVPOptions {
    /// Method to use. Default: DOP853.
    #[builder(default)]
    pub method: Method,
    /// Relative tolerance for error estimation.
    #[builder(default = 1e-6, into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation.
    #[builder(default = 1e-6, into)]
    pub atol: Tolerance,
    /// Initial step size. Estimated from the problem when absent. Must not be
    /// below `min_step`; values above `max_step` are reduced to it.
    pub first_step: Option<Float>,
    /// Smallest step the controller may shrink to before giving up.
    /// Default: a few ulps of the current time.
    pub min_step: Option<Float>,
    /// Largest allowed step size. Default: the length of the span.
    pub max_step: Option<Float>,
    /// Maximum number of step attempts, accepted or rejected.
    #[builder(default = 100_000)]
    pub nmax: usize,
    /// Safety factor in step-size prediction.
    #[builder(default = 0.9)]
    pub safety_factor: Float,
    /// Smallest allowed ratio between consecutive step sizes.
    #[builder(default = 0.2)]
    pub scale_min: Float,
    /// Largest allowed ratio between consecutive step sizes.
    #[builder(default = 5.0)]
    pub scale_max: Float,
    /// Output grid. Without one, every accepted step endpoint is reported.
    #[builder(into)]
    pub saveat: Option<OutputGrid>,
    /// Times the integrator must land on exactly, such as known
    /// discontinuities of the right-hand side.
    #[builder(default, into)]
    pub tstops: Vec<Float>,
}

impl Default for IVPOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
