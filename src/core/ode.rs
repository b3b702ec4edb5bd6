//! User-supplied ODE system.

use crate::Float;

/// User-supplied ODE system.
///
/// Implement this trait for your problem to provide the right-hand side
/// function y' = f(t, y, p). The integrator repeatedly calls `ode` with a time
/// `t`, a state `y` and the caller's parameter bundle `p`, and expects you to
/// fill `dydt` with the derivative values.
///
/// # Contract
///
/// - `ode` must be a pure function of `(t, y, p)`: the integrator may evaluate
///   the same point more than once and relies on getting the same answer.
/// - Times are chosen by the integrator. They are not monotonic across calls
///   (stage nodes, rejected steps) and may coincide exactly with a
///   discontinuity of the right-hand side, e.g. an impulse defined only at
///   `t == 0.0`. Such points must evaluate without panicking; expect the step
///   size controller to take very small steps around them.
/// - `p` is passed through unchanged for the whole solve.
///
/// # Example
///
/// ```
/// use dense_ivp::prelude::*;
///
/// /// m y'' + b y' + k y = 0 with p = [m, b, k].
/// struct Oscillator;
///
/// impl ODE for Oscillator {
///     fn ode(&self, _t: f64, y: &[f64], p: &[f64], dydt: &mut [f64]) {
///         let (m, b, k) = (p[0], p[1], p[2]);
///         dydt[0] = y[1];
///         dydt[1] = -b / m * y[1] - k / m * y[0];
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, t: Float, y: &[Float], p: &[Float], dydt: &mut [Float]);
}

impl<F> ODE for F
where
    F: Fn(Float, &[Float], &[Float], &mut [Float]),
{
    fn ode(&self, t: Float, y: &[Float], p: &[Float], dydt: &mut [Float]) {
        self(t, y, p, dydt)
    }
}
