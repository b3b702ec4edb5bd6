//! # Example: Impulse-driven damped oscillator
//!
//! m u'' + b u' + k u = 100 r(t), with r(t) = 1 at t = 0 and 0 otherwise.
//!
//! Parameters: zeta = 0.25, wn = 1.0, m = 1.0, so b = 2 zeta wn m and
//! k = wn^2 m. Initial condition u(0) = 1, u'(0) = 0, sampled every 0.1
//! over [0, 100].
//!
//! The impulse is only seen by the first stage of the first step. The step
//! size controller shrinks that step until it is resolved, after which the
//! response is the free underdamped oscillation at wn sqrt(1 - zeta^2).
//!

use dense_ivp::prelude::*;

struct DampedOscillator;

fn r(t: f64) -> f64 {
    if t == 0.0 { 1.0 } else { 0.0 }
}

impl ODE for DampedOscillator {
    fn ode(&self, t: f64, u: &[f64], p: &[f64], dudt: &mut [f64]) {
        let (m, b, k) = (p[0], p[1], p[2]);
        dudt[0] = u[1];
        dudt[1] = -b / m * u[1] - k / m * u[0] + 100.0 * r(t) / m;
    }
}

fn main() {
    let (zeta, wn, m) = (0.25, 1.0, 1.0);
    let params = [m, 2.0 * zeta * wn * m, wn * wn * m];

    let options = IVPOptions::builder()
        .rtol(1e-9)
        .atol(1e-9)
        .saveat(0.1)
        .build();

    let sol = match solve_ivp(&DampedOscillator, 0.0, 100.0, &[1.0, 0.0], &params, options) {
        Ok(sol) => sol,
        Err(e) => {
            eprintln!("invalid problem: {}", e);
            return;
        }
    };
    println!("Final status: {:?}", sol.status);
    println!(
        "Steps: {} (accepted {} / rejected {}), nfev = {}",
        sol.stats.nstep, sol.stats.naccpt, sol.stats.nrejct, sol.stats.nfev
    );

    for (t, u) in sol.iter().step_by(50) {
        println!("t = {:>6.1}, u = {:>+.6e}, u' = {:>+.6e}", t, u[0], u[1]);
    }

    match sol.sol(101.0) {
        Ok(u) => println!("u(101) = {:?}", u),
        Err(e) => println!("u(101): {}", e),
    }
}
