//! # Example: Exponential Decay
//!
//! Solve the exponential decay equation as a first-order system.
//!
//! Equations:
//! dy/dt = -k y
//!
//! Initial condition: y(0) = 1.0, parameter k = 0.5
//!

use dense_ivp::prelude::*;

struct Decay;

impl ODE for Decay {
    fn ode(&self, _t: f64, y: &[f64], p: &[f64], dydt: &mut [f64]) {
        for i in 0..y.len() {
            dydt[i] = -p[0] * y[i];
        }
    }
}

fn main() {
    let t0 = 0.0;
    let tf = 5.0;
    let y0 = [1.0];
    let params = [0.5];

    let options = IVPOptions::builder()
        .method(Method::RK45)
        .rtol(1e-6)
        .atol(1e-6)
        .saveat(0.5)
        .build();

    match solve_ivp(&Decay, t0, tf, &y0, &params, options) {
        Ok(sol) => {
            println!("Final status: {:?}", sol.status);
            println!("Number of function evaluations: {}", sol.stats.nfev);
            println!("Number of steps taken: {}", sol.stats.nstep);
            println!("Number of accepted steps: {}", sol.stats.naccpt);
            println!("Number of rejected steps: {}", sol.stats.nrejct);

            for (t, y) in sol.iter() {
                println!("t = {:.2}, y = {:.8}, exact = {:.8}", t, y[0], (-params[0] * t).exp());
            }
        }
        Err(e) => eprintln!("Integration failed: {}", e),
    }
}
