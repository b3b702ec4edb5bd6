//! Example: Dense output interpolation on a harmonic oscillator

use dense_ivp::prelude::*;
use std::f64::consts::PI;

struct SHO;

impl ODE for SHO {
    fn ode(&self, _t: f64, y: &[f64], _p: &[f64], dydt: &mut [f64]) {
        // y' = [y1, -y0]
        dydt[0] = y[1];
        dydt[1] = -y[0];
    }
}

fn main() {
    let t0 = 0.0;
    let tf = 2.0 * PI; // one period
    let y0 = [1.0, 0.0];

    let options = IVPOptions::builder().rtol(1e-9).atol(1e-9).build();

    let sol = solve_ivp(&SHO, t0, tf, &y0, &[], options).expect("solve_ivp failed");
    println!("Final status: {:?}", sol.status);
    println!(
        "Steps: {} (accepted {} / rejected {})",
        sol.stats.nstep, sol.stats.naccpt, sol.stats.nrejct
    );

    // Evaluate the continuous solution on a grid much finer than the steps
    let (t0, t1) = sol.sol_span();
    let npts = 41;
    let ts: Vec<f64> = (0..=npts)
        .map(|i| t0 + (t1 - t0) * (i as f64) / (npts as f64))
        .collect();
    let ys = sol.sol_many(&ts).expect("inside the integrated span");

    for (i, (t, y)) in ts.iter().zip(ys.iter()).enumerate() {
        if i % 8 == 0 {
            println!(
                "t = {:>7.4}, y = [{:>.6}, {:>.6}]  ref = [{:>.6}, {:>.6}]",
                t,
                y[0],
                y[1],
                t.cos(),
                -t.sin()
            );
        }
    }

    // Step-by-step: the same problem one accepted step at a time
    let mut session = SolverSession::new(&SHO, 0.0, tf, &y0, &[], &IVPOptions::default())
        .expect("valid problem");
    while let Ok(Status::Running) = session.step() {
        let seg = session.trajectory().segments().last().expect("a step was taken");
        println!("step [{:.4}, {:.4}] h = {:.3e}", seg.t_start(), seg.t_end(), seg.h());
    }
}
