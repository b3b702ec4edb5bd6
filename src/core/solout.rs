//! User defined callback hook executed after each accepted step.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{Float, core::interpolate::Interpolate};

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller. The
///   step that was just accepted stays in the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// `SolOut` lets user code observe the solution as the integrator progresses
/// and is the cooperative cancellation point of a solve: it runs between
/// steps, never between the stages of a step. The arguments are:
/// - `t_old`: the left end of the accepted step,
/// - `t`: the right end of the accepted step (the new current time),
/// - `y`: the committed state at `t`,
/// - `interpolator`: dense output valid on `[t_old, t]`.
///
/// # Example
///
/// ```
/// use dense_ivp::prelude::*;
///
/// /// Stops the solve once the first component goes negative.
/// struct StopBelowZero;
///
/// impl SolOut for StopBelowZero {
///     fn solout<I: Interpolate>(&mut self, _t_old: f64, _t: f64, y: &[f64], _i: &I) -> ControlFlag {
///         if y[0] < 0.0 { ControlFlag::Interrupt } else { ControlFlag::Continue }
///     }
/// }
/// ```
pub trait SolOut {
    fn solout<I: Interpolate>(
        &mut self,
        t_old: Float,
        t: Float,
        y: &[Float],
        interpolator: &I,
    ) -> ControlFlag;
}

/// No-op callback used when the caller does not supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummySolOut;

impl SolOut for DummySolOut {
    fn solout<I: Interpolate>(&mut self, _t_old: Float, _t: Float, _y: &[Float], _interpolator: &I) -> ControlFlag {
        ControlFlag::Continue
    }
}

/// Shareable cancellation flag.
///
/// Clone it into another thread and call [`cancel`](Self::cancel); the solve
/// holding the other clone stops after the step in progress is accepted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl SolOut for CancelToken {
    fn solout<I: Interpolate>(&mut self, _t_old: Float, _t: Float, _y: &[Float], _interpolator: &I) -> ControlFlag {
        if self.is_cancelled() {
            ControlFlag::Interrupt
        } else {
            ControlFlag::Continue
        }
    }
}
