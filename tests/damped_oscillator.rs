use approx::assert_abs_diff_eq;
use dense_ivp::prelude::*;

mod common;
use common::{DampedOscillator, free_response};

const ZETA: f64 = 0.25;
const WN: f64 = 1.0;

fn solve(tol: f64) -> IVPSolution {
    let p = DampedOscillator::params(ZETA, WN, 1.0);
    let options = IVPOptions::builder().rtol(tol).atol(tol).saveat(0.1).build();
    solve_ivp(&DampedOscillator, 0.0, 100.0, &[1.0, 0.0], &p, options).unwrap()
}

#[test]
fn sampled_response_is_underdamped() {
    let sol = solve(1e-9);
    assert_eq!(sol.status, Status::Completed);
    assert_eq!(sol.t.len(), 1001);
    assert_eq!(sol.t[0], 0.0);
    assert_eq!(sol.y[0].as_slice(), &[1.0, 0.0]);
    assert_eq!(*sol.t.last().unwrap(), 100.0);

    // The impulse only touches the first, tiny accepted step.
    for (t, y) in sol.iter() {
        assert_abs_diff_eq!(y[0], free_response(ZETA, WN, t), epsilon = 1e-6);
    }

    // Successive peaks shrink by exp(-zeta wn Td).
    let wd = WN * (1.0 - ZETA * ZETA).sqrt();
    let period = 2.0 * std::f64::consts::PI / wd;
    let a0 = sol.sol(period).unwrap()[0];
    let a1 = sol.sol(2.0 * period).unwrap()[0];
    assert!(a1 < a0 && a0 < 1.0);
    assert_abs_diff_eq!(a1 / a0, (-ZETA * WN * period).exp(), epsilon = 1e-5);
}

#[test]
fn impulse_forces_rejections_and_counts_add_up() {
    let sol = solve(1e-9);
    let stats = sol.stats;
    assert!(stats.nrejct > 0);
    assert_eq!(stats.nstep, stats.naccpt + stats.nrejct);
    assert_eq!(sol.trajectory.len(), stats.naccpt);
    assert!(stats.nfev > stats.nstep);
}

#[test]
fn zero_tolerance_underflows_at_the_impulse() {
    let p = DampedOscillator::params(ZETA, WN, 1.0);
    let options = IVPOptions::builder().rtol(0.0).atol(0.0).saveat(0.1).build();
    let sol = solve_ivp(&DampedOscillator, 0.0, 100.0, &[1.0, 0.0], &p, options).unwrap();
    assert_eq!(sol.status, Status::Failed);
    assert!(matches!(sol.failure, Some(Error::StepSizeUnderflow { t, .. }) if t == 0.0));
    assert!(sol.trajectory.is_empty());
    // Only t0 is covered
    assert_eq!(sol.t, vec![0.0]);
    assert_eq!(sol.y[0].as_slice(), &[1.0, 0.0]);
}

#[test]
fn query_past_the_end_is_out_of_range() {
    let sol = solve(1e-6);
    let err = sol.sol(101.0).unwrap_err();
    assert_eq!(err, Error::OutOfRange { t: 101.0, start: 0.0, end: 100.0 });
    assert!(sol.sol(-0.5).is_err());
}
