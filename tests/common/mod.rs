#![allow(dead_code)]

use dense_ivp::prelude::*;

/// Unit-mass spring-damper `m u'' + c u' + k u = 100 r(t)` as a first-order
/// system, with parameters `p = [m, c, k]`.
///
/// `r(t)` is an impulse that is nonzero only at exactly `t == 0`, so only
/// the very first stage of the first step sees it.
pub struct DampedOscillator;

impl DampedOscillator {
    pub fn params(zeta: f64, wn: f64, m: f64) -> [f64; 3] {
        [m, 2.0 * zeta * wn * m, wn * wn * m]
    }
}

fn impulse(t: f64) -> f64 {
    if t == 0.0 { 1.0 } else { 0.0 }
}

impl ODE for DampedOscillator {
    fn ode(&self, t: f64, y: &[f64], p: &[f64], dydt: &mut [f64]) {
        let (m, c, k) = (p[0], p[1], p[2]);
        dydt[0] = y[1];
        dydt[1] = -c / m * y[1] - k / m * y[0] + 100.0 * impulse(t) / m;
    }
}

/// Free response of the underdamped oscillator from `u(0) = 1, u'(0) = 0`.
pub fn free_response(zeta: f64, wn: f64, t: f64) -> f64 {
    let wd = wn * (1.0 - zeta * zeta).sqrt();
    (-zeta * wn * t).exp() * ((wd * t).cos() + zeta * wn / wd * (wd * t).sin())
}

/// `y' = -p[0] y`
pub struct Decay;

impl ODE for Decay {
    fn ode(&self, _t: f64, y: &[f64], p: &[f64], dydt: &mut [f64]) {
        dydt[0] = -p[0] * y[0];
    }
}

/// `y'' = -y`, exact solution `(cos t, -sin t)` from `(1, 0)`.
pub struct SHO;

impl ODE for SHO {
    fn ode(&self, _t: f64, y: &[f64], _p: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = -y[0];
    }
}

pub fn opts(method: Method, tol: f64) -> IVPOptions {
    IVPOptions::builder().method(method).rtol(tol).atol(tol).build()
}
