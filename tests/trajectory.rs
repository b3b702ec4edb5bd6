use dense_ivp::prelude::*;

mod common;
use common::{Decay, SHO, opts};

#[test]
fn segments_are_contiguous_and_strictly_increasing() {
    let sol = solve_ivp(&SHO, 0.0, 10.0, &[1.0, 0.0], &[], opts(Method::DOP853, 1e-8)).unwrap();
    let segments = sol.trajectory.segments();
    assert_eq!(segments[0].t_start(), 0.0);
    assert_eq!(segments.last().unwrap().t_end(), 10.0);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].t_end(), pair[1].t_start());
        assert_eq!(pair[0].y_end(), pair[1].y_start());
        assert!(pair[1].t_end() > pair[0].t_end());
    }
}

#[test]
fn queries_are_idempotent() {
    let sol = solve_ivp(&SHO, 0.0, 10.0, &[1.0, 0.0], &[], opts(Method::RK45, 1e-6)).unwrap();
    let ts: Vec<f64> = (0..=100).map(|i| 0.1 * i as f64).collect();
    let first = sol.sol_many(&ts).unwrap();
    let second = sol.sol_many(&ts).unwrap();
    assert_eq!(first, second);
}

#[test]
fn non_finite_rhs_fails_with_time() {
    let blowup = |t: f64, y: &[f64], _p: &[f64], dydt: &mut [f64]| {
        dydt[0] = if t > 1.0 { f64::NAN } else { -y[0] };
    };
    let sol = solve_ivp(&blowup, 0.0, 5.0, &[1.0], &[], IVPOptions::default()).unwrap();
    assert_eq!(sol.status, Status::Failed);
    match sol.failure {
        Some(Error::NonFiniteState { t }) => assert!(t > 1.0),
        other => panic!("unexpected failure {:?}", other),
    }
    let end = sol.trajectory.t_end();
    assert!(end <= 1.0 + 1e-12);
    assert!(sol.sol(end).is_ok());
}

#[test]
fn max_steps_guard() {
    let options = IVPOptions::builder().nmax(10).max_step(0.01).build();
    let sol = solve_ivp(&Decay, 0.0, 1.0, &[1.0], &[1.0], options).unwrap();
    assert!(matches!(sol.failure, Some(Error::MaxStepsExceeded { nmax: 10, .. })));
    assert_eq!(sol.stats.nstep, 10);
}

/// Interrupts after a fixed number of accepted steps.
struct StopAfter(usize);

impl SolOut for StopAfter {
    fn solout<I: Interpolate>(&mut self, t_old: f64, t: f64, y: &[f64], interpolator: &I) -> ControlFlag {
        // the interpolant covers the step just taken
        let mut yi = vec![0.0; y.len()];
        interpolator.interpolate(t, &mut yi).unwrap();
        assert_eq!(yi, y);
        assert!(interpolator.interpolate(0.5 * (t_old + t), &mut yi).is_ok());

        self.0 -= 1;
        if self.0 == 0 { ControlFlag::Interrupt } else { ControlFlag::Continue }
    }
}

#[test]
fn callback_interrupts_the_solve() {
    let mut stop = StopAfter(5);
    let options = IVPOptions::builder().max_step(0.1).build();
    let sol = solve_ivp_with(&SHO, 0.0, 10.0, &[1.0, 0.0], &[], options, &mut stop).unwrap();
    assert_eq!(sol.status, Status::Interrupted);
    assert!(sol.failure.is_none());
    assert_eq!(sol.trajectory.len(), 5);
    assert_eq!(sol.t.len(), 6);
}

#[test]
fn cancel_token_from_another_thread() {
    let token = CancelToken::new();
    let remote = token.clone();
    std::thread::spawn(move || remote.cancel()).join().unwrap();
    let mut token = token;
    let sol = solve_ivp_with(&SHO, 0.0, 10.0, &[1.0, 0.0], &[], IVPOptions::default(), &mut token).unwrap();
    assert_eq!(sol.status, Status::Interrupted);
    assert_eq!(sol.trajectory.len(), 1);
}

#[test]
fn tstops_split_steps_at_discontinuities() {
    // forcing switches on at t = 1
    let step_input = |t: f64, y: &[f64], _p: &[f64], dydt: &mut [f64]| {
        dydt[0] = if t >= 1.0 { 1.0 } else { 0.0 } - y[0];
    };
    let options = IVPOptions::builder().rtol(1e-10).atol(1e-10).tstops(vec![1.0]).build();
    let sol = solve_ivp(&step_input, 0.0, 3.0, &[0.0], &[], options).unwrap();
    assert!(sol.trajectory.iter().any(|s| s.t_end() == 1.0));
    let y = sol.sol(3.0).unwrap();
    assert!((y[0] - (1.0 - (-2.0f64).exp())).abs() < 1e-8);
}

#[test]
fn session_extends_after_out_of_range() {
    let p = [1.0];
    let options = opts(Method::DOP853, 1e-9);
    let mut session = SolverSession::new(&Decay, 0.0, 100.0, &[1.0], &p, &options).unwrap();
    assert_eq!(session.advance_to(50.0).unwrap(), Status::Running);
    assert_eq!(session.t(), 50.0);
    assert_eq!(session.solve().unwrap(), Status::Completed);

    assert!(matches!(session.trajectory().query(110.0), Err(Error::OutOfRange { .. })));
    session.set_final_time(110.0).unwrap();
    session.solve().unwrap();
    let y = session.trajectory().query(110.0).unwrap();
    assert!((y[0] - (-110.0f64).exp()).abs() < 1e-12);
}
