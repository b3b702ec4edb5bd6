//! Example: cancelling a long solve from another thread.
//!
//! A Lorenz system is integrated over a long span while a watchdog thread
//! cancels it. The partial trajectory is still usable afterwards.

use std::{thread, time::Duration};

use dense_ivp::prelude::*;

struct Lorenz;

impl ODE for Lorenz {
    fn ode(&self, _t: f64, y: &[f64], p: &[f64], dydt: &mut [f64]) {
        let (sigma, rho, beta) = (p[0], p[1], p[2]);
        dydt[0] = sigma * (y[1] - y[0]);
        dydt[1] = y[0] * (rho - y[2]) - y[1];
        dydt[2] = y[0] * y[1] - beta * y[2];
    }
}

fn main() {
    let token = CancelToken::new();
    let watchdog = {
        let token = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            token.cancel();
        })
    };

    let params = [10.0, 28.0, 8.0 / 3.0];
    let options = IVPOptions::builder()
        .rtol(1e-12)
        .atol(1e-12)
        .nmax(10_000_000)
        .build();
    let mut token = token;
    let sol = solve_ivp_with(&Lorenz, 0.0, 1.0e5, &[1.0, 1.0, 1.0], &params, options, &mut token)
        .expect("valid problem");
    let _ = watchdog.join();

    let (t0, t1) = sol.sol_span();
    println!("status: {:?}, integrated [{}, {:.3}] in {} steps", sol.status, t0, t1, sol.stats.naccpt);
    if let Ok(y) = sol.sol(0.5 * t1) {
        println!("y({:.3}) = {:?}", 0.5 * t1, y);
    }
}
