//! Step-by-step driver for one integration.

use crate::{
    Float,
    core::{
        ode::ODE,
        solout::{ControlFlag, DummySolOut, SolOut},
        state::StateVector,
        status::Status,
        tolerance::Tolerances,
    },
    error::Error,
    methods::{
        controller::StepController,
        hinit::hinit,
        step::{StepIntegrator, StepOutcome},
    },
};

use super::{
    options::{IVPOptions, Method},
    solution::Stats,
    trajectory::Trajectory,
};

/// An integration in progress.
///
/// The session owns the current time and state, the proposed step size and
/// the [`Trajectory`] built so far. Each call to [`step`](Self::step)
/// performs step attempts until one is accepted, appending exactly one
/// segment; rejected attempts leave no trace in the trajectory.
///
/// ```
/// use dense_ivp::prelude::*;
///
/// let decay = |_t: f64, y: &[f64], _p: &[f64], dydt: &mut [f64]| dydt[0] = -y[0];
/// let options = IVPOptions::default();
/// let mut session = SolverSession::new(&decay, 0.0, 1.0, &[1.0], &[], &options).unwrap();
/// while session.step().unwrap() == Status::Running {}
/// assert_eq!(session.t(), 1.0);
/// assert!((session.y()[0] - (-1.0f64).exp()).abs() < 1e-5);
/// ```
pub struct SolverSession<'a, F: ODE + ?Sized> {
    f: &'a F,
    params: &'a [Float],
    integrator: StepIntegrator,
    t0: Float,
    tf: Float,
    t: Float,
    y: StateVector,
    /// Derivative at `(t, y)`, stage 0 of the next attempt.
    dydt: Vec<Float>,
    /// Free-running step size proposal.
    h: Float,
    h_max: Option<Float>,
    h_min: Float,
    nmax: usize,
    /// Sorted stop times; `tstops[next_stop..]` all lie after `t`.
    tstops: Vec<Float>,
    next_stop: usize,
    rejected_last: bool,
    trajectory: Trajectory,
    status: Status,
    setup_nfev: usize,
    nstep: usize,
    naccpt: usize,
    nrejct: usize,
    failure: Option<Error>,
}

impl<'a, F: ODE + ?Sized> SolverSession<'a, F> {
    /// Validate the inputs and prepare the first step.
    ///
    /// Evaluates the right-hand side at the initial point, plus once more
    /// when the initial step size has to be estimated.
    pub fn new(
        f: &'a F,
        t0: Float,
        tf: Float,
        y0: &[Float],
        params: &'a [Float],
        options: &IVPOptions,
    ) -> Result<Self, Error> {
        if !(t0.is_finite() && tf.is_finite() && tf > t0) {
            return Err(Error::InvalidTimeSpan { t0, tf });
        }
        if !y0.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteState { t: t0 });
        }
        let n = y0.len();

        let tableau = options.method.tableau();
        if let Method::Custom(custom) = options.method {
            custom.validate(1e-10)?;
        }

        let tol = Tolerances::new(options.atol.clone(), options.rtol.clone());
        tol.validate(n)?;

        for h in [options.first_step, options.min_step, options.max_step].into_iter().flatten() {
            if !(h.is_finite() && h > 0.0) {
                return Err(Error::InvalidStepSize(h));
            }
        }
        if let (Some(hmin), Some(hmax)) = (options.min_step, options.max_step) {
            if hmin > hmax {
                return Err(Error::InvalidSettings(format!(
                    "min_step {} exceeds max_step {}",
                    hmin, hmax
                )));
            }
        }
        if let (Some(h0), Some(hmin)) = (options.first_step, options.min_step) {
            if h0 < hmin {
                return Err(Error::InvalidSettings(format!(
                    "first_step {} is below min_step {}",
                    h0, hmin
                )));
            }
        }
        if options.nmax == 0 {
            return Err(Error::InvalidSettings("nmax must be positive".into()));
        }
        let controller = StepController::new(
            tableau,
            options.safety_factor,
            options.scale_min,
            options.scale_max,
        )?;

        if let Some(&bad) = options.tstops.iter().find(|t| !t.is_finite()) {
            return Err(Error::InvalidStop(bad));
        }
        let mut tstops: Vec<Float> = options.tstops.iter().copied().filter(|&s| s > t0).collect();
        tstops.sort_by(Float::total_cmp);
        tstops.dedup();

        let mut dydt = vec![0.0; n];
        f.ode(t0, y0, params, &mut dydt);
        let mut setup_nfev = 1;
        if !dydt.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteState { t: t0 });
        }

        let h_max = options.max_step.unwrap_or(tf - t0);
        let h = match options.first_step {
            Some(h) => h.min(h_max),
            None => {
                let (h, nfev) = hinit(f, t0, y0, params, &dydt, tableau.order, h_max, &tol);
                setup_nfev += nfev;
                h
            }
        };
        let h_min = options.min_step.unwrap_or(Float::EPSILON * (tf - t0));

        log::debug!(
            "{} session on [{}, {}] with {} components, h0 = {:e}",
            tableau.name,
            t0,
            tf,
            n,
            h
        );

        Ok(Self {
            f,
            params,
            integrator: StepIntegrator::new(tableau, tol, controller, n),
            t0,
            tf,
            t: t0,
            y: StateVector::from(y0),
            dydt,
            h: h.max(h_min),
            h_max: options.max_step,
            h_min,
            nmax: options.nmax,
            tstops,
            next_stop: 0,
            rejected_last: false,
            trajectory: Trajectory::new(t0, StateVector::from(y0)),
            status: Status::Running,
            setup_nfev,
            nstep: 0,
            naccpt: 0,
            nrejct: 0,
            failure: None,
        })
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn y(&self) -> &StateVector {
        &self.y
    }

    /// Step size the next attempt will start from.
    pub fn h(&self) -> Float {
        self.h
    }

    pub fn t0(&self) -> Float {
        self.t0
    }

    pub fn tf(&self) -> Float {
        self.tf
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The error that ended the integration, if any.
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            nfev: self.setup_nfev + self.integrator.nfev(),
            nstep: self.nstep,
            naccpt: self.naccpt,
            nrejct: self.nrejct,
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    /// Advance by one accepted step. Returns the status afterwards.
    pub fn step(&mut self) -> Result<Status, Error> {
        self.step_with(&mut DummySolOut)
    }

    /// Like [`step`](Self::step), calling `solout` after the accepted step.
    pub fn step_with<S: SolOut>(&mut self, solout: &mut S) -> Result<Status, Error> {
        let target = self.tf;
        self.step_toward(target, solout)
    }

    /// Integrate until `t` reaches `target`, landing on it exactly.
    ///
    /// `target` may not lie beyond the final time; extend the session with
    /// [`set_final_time`](Self::set_final_time) first. Targets at or before
    /// the current time are already covered by the trajectory and return
    /// immediately.
    pub fn advance_to(&mut self, target: Float) -> Result<Status, Error> {
        self.advance_to_with(target, &mut DummySolOut)
    }

    pub fn advance_to_with<S: SolOut>(&mut self, target: Float, solout: &mut S) -> Result<Status, Error> {
        if !(target <= self.tf) {
            return Err(Error::OutOfRange {
                t: target,
                start: self.t0,
                end: self.tf,
            });
        }
        while self.t < target {
            match self.step_toward(target, solout)? {
                Status::Running => {}
                status => return Ok(status),
            }
        }
        Ok(self.status)
    }

    /// Integrate to the final time.
    pub fn solve(&mut self) -> Result<Status, Error> {
        self.solve_with(&mut DummySolOut)
    }

    pub fn solve_with<S: SolOut>(&mut self, solout: &mut S) -> Result<Status, Error> {
        loop {
            match self.step_with(solout)? {
                Status::Running => {}
                status => return Ok(status),
            }
        }
    }

    /// Move the final time to `tf`.
    ///
    /// The new final time must lie after the current time. A completed
    /// session becomes running again, so a trajectory can be extended after a
    /// query beyond its end failed.
    pub fn set_final_time(&mut self, tf: Float) -> Result<(), Error> {
        if !(tf.is_finite() && tf > self.t) {
            return Err(Error::InvalidTimeSpan { t0: self.t, tf });
        }
        self.tf = tf;
        if self.status == Status::Completed {
            self.status = Status::Running;
        }
        Ok(())
    }

    fn step_toward<S: SolOut>(&mut self, target: Float, solout: &mut S) -> Result<Status, Error> {
        match self.status {
            Status::Failed => {
                if let Some(err) = &self.failure {
                    return Err(err.clone());
                }
            }
            Status::Completed => return Ok(Status::Completed),
            Status::Interrupted => self.status = Status::Running,
            Status::Running => {}
        }
        match self.attempt_until_accepted(target, solout) {
            Ok(status) => Ok(status),
            Err(err) => {
                log::warn!("integration failed at t = {}: {}", self.t, err);
                self.status = Status::Failed;
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Smallest step the controller may retry with at the current time.
    fn min_step(&self) -> Float {
        self.h_min.max(4.0 * Float::EPSILON * self.t.abs())
    }

    fn max_step(&self) -> Float {
        self.h_max.unwrap_or(self.tf - self.t0)
    }

    fn attempt_until_accepted<S: SolOut>(&mut self, target: Float, solout: &mut S) -> Result<Status, Error> {
        loop {
            if self.nstep >= self.nmax {
                return Err(Error::MaxStepsExceeded {
                    t: self.t,
                    nmax: self.nmax,
                });
            }

            let mut boundary = target.min(self.tf);
            if let Some(&stop) = self.tstops.get(self.next_stop) {
                boundary = boundary.min(stop);
            }
            let mut h = self.h;
            let clamped = self.t + 1.01 * h >= boundary;
            let t_end = if clamped {
                h = boundary - self.t;
                boundary
            } else {
                self.t + h
            };

            let outcome = self.integrator.attempt(self.f, self.params, self.t, &self.y, &self.dydt, h, t_end)?;
            self.nstep += 1;

            match outcome {
                StepOutcome::Accepted(step) => {
                    self.naccpt += 1;
                    let t_old = self.t;
                    log::trace!("accepted t = {} h = {:e} err = {:.3e}", t_old, h, step.error);

                    let mut h_next = step.h_next;
                    if self.rejected_last {
                        h_next = h_next.min(h);
                    }
                    if clamped && h < self.h {
                        h_next = self.h;
                    }
                    self.rejected_last = false;

                    self.t = t_end;
                    self.y = step.segment.y_end().clone();
                    self.dydt.copy_from_slice(self.integrator.end_derivative());
                    self.h = h_next.min(self.max_step()).max(self.min_step());
                    while self.tstops.get(self.next_stop).is_some_and(|&s| s <= self.t) {
                        self.next_stop += 1;
                    }

                    let flag = solout.solout(t_old, self.t, &self.y, &step.segment);
                    self.trajectory.push(step.segment);

                    if self.t >= self.tf {
                        self.status = Status::Completed;
                        log::debug!(
                            "completed at t = {} after {} steps ({} rejected)",
                            self.t,
                            self.nstep,
                            self.nrejct
                        );
                    } else if flag == ControlFlag::Interrupt {
                        self.status = Status::Interrupted;
                        log::debug!("interrupted at t = {}", self.t);
                    }
                    return Ok(self.status);
                }
                StepOutcome::Rejected { error, h_retry } => {
                    self.nrejct += 1;
                    self.rejected_last = true;
                    log::trace!("rejected t = {} h = {:e} err = {:.3e}", self.t, h, error);
                    if h_retry < self.min_step() {
                        return Err(Error::StepSizeUnderflow { t: self.t, h: h_retry });
                    }
                    self.h = h_retry;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solout::CancelToken;
    use approx::assert_abs_diff_eq;

    struct Decay;

    impl ODE for Decay {
        fn ode(&self, _t: Float, y: &[Float], p: &[Float], dydt: &mut [Float]) {
            dydt[0] = -p[0] * y[0];
        }
    }

    fn session<'a>(params: &'a [Float], tf: Float, options: &IVPOptions) -> SolverSession<'a, Decay> {
        SolverSession::new(&Decay, 0.0, tf, &[1.0], params, options).unwrap()
    }

    #[test]
    fn solves_to_final_time() {
        let options = IVPOptions::builder().rtol(1e-10).atol(1e-10).build();
        let mut s = SolverSession::new(&Decay, 0.0, 2.0, &[1.0], &[1.0], &options).unwrap();
        assert_eq!(s.solve().unwrap(), Status::Completed);
        assert_eq!(s.t(), 2.0);
        assert_abs_diff_eq!(s.y()[0], (-2.0 as Float).exp(), epsilon = 1e-9);
        let stats = s.stats();
        assert_eq!(stats.nstep, stats.naccpt + stats.nrejct);
        assert_eq!(s.trajectory().len(), stats.naccpt);
        // stepping a completed session is a no-op
        assert_eq!(s.step().unwrap(), Status::Completed);
        assert_eq!(s.trajectory().len(), stats.naccpt);
    }

    #[test]
    fn invalid_inputs() {
        let f = Decay;
        let opts = IVPOptions::default();
        let p = [1.0];
        assert!(matches!(
            SolverSession::new(&f, 1.0, 1.0, &[1.0], &p, &opts).err(),
            Some(Error::InvalidTimeSpan { .. })
        ));
        assert!(matches!(
            SolverSession::new(&f, 0.0, 1.0, &[Float::NAN], &p, &opts).err(),
            Some(Error::NonFiniteState { t: 0.0 })
        ));
        let opts = IVPOptions::builder().first_step(-1.0).build();
        assert_eq!(
            SolverSession::new(&f, 0.0, 1.0, &[1.0], &p, &opts).err(),
            Some(Error::InvalidStepSize(-1.0))
        );
        let opts = IVPOptions::builder().first_step(1e-6).min_step(1e-3).build();
        assert!(matches!(
            SolverSession::new(&f, 0.0, 1.0, &[1.0], &p, &opts).err(),
            Some(Error::InvalidSettings(_))
        ));
        let opts = IVPOptions::builder().atol(vec![1e-6, 1e-6]).build();
        assert!(matches!(
            SolverSession::new(&f, 0.0, 1.0, &[1.0], &p, &opts).err(),
            Some(Error::InvalidDimension { expected: 1, found: 2 })
        ));
        let opts = IVPOptions::builder().tstops(vec![0.5, Float::NAN]).build();
        assert!(matches!(
            SolverSession::new(&f, 0.0, 1.0, &[1.0], &p, &opts).err(),
            Some(Error::InvalidStop(_))
        ));
        let opts = IVPOptions::builder().safety_factor(1.5).build();
        assert!(matches!(
            SolverSession::new(&f, 0.0, 1.0, &[1.0], &p, &opts).err(),
            Some(Error::InvalidSettings(_))
        ));
    }

    #[test]
    fn advance_to_lands_exactly_and_extends() {
        let opts = IVPOptions::builder().rtol(1e-8).atol(1e-8).build();
        let p = [1.0];
        let mut s = session(&p, 2.0, &opts);
        assert_eq!(s.advance_to(0.7).unwrap(), Status::Running);
        assert_eq!(s.t(), 0.7);
        assert_eq!(s.trajectory().t_end(), 0.7);
        // already covered
        assert_eq!(s.advance_to(0.3).unwrap(), Status::Running);
        assert_eq!(s.t(), 0.7);
        assert!(matches!(s.advance_to(3.0), Err(Error::OutOfRange { .. })));

        assert_eq!(s.solve().unwrap(), Status::Completed);
        assert!(s.trajectory().query(2.5).is_err());
        s.set_final_time(3.0).unwrap();
        assert_eq!(s.status(), Status::Running);
        assert_eq!(s.solve().unwrap(), Status::Completed);
        assert_abs_diff_eq!(s.trajectory().query(2.5).unwrap()[0], (-2.5 as Float).exp(), epsilon = 1e-7);
        assert!(s.set_final_time(1.0).is_err());
    }

    #[test]
    fn tstops_are_segment_boundaries() {
        let opts = IVPOptions::builder().tstops(vec![0.33, 1.7, -1.0, 0.33]).build();
        let p = [1.0];
        let mut s = session(&p, 2.0, &opts);
        s.solve().unwrap();
        let ends: Vec<Float> = s.trajectory().iter().map(|seg| seg.t_end()).collect();
        assert!(ends.contains(&0.33));
        assert!(ends.contains(&1.7));
        assert_eq!(*ends.last().unwrap(), 2.0);
    }

    #[test]
    fn cancellation_interrupts_and_resumes() {
        let p = [1.0];
        let opts = IVPOptions::builder().first_step(1e-3).max_step(1e-2).build();
        let mut s = session(&p, 1.0, &opts);
        let mut token = CancelToken::new();
        s.step_with(&mut token).unwrap();
        token.cancel();
        assert_eq!(s.solve_with(&mut token).unwrap(), Status::Interrupted);
        assert_eq!(s.trajectory().len(), 2);
        // a fresh call resumes
        assert_eq!(s.solve().unwrap(), Status::Completed);
    }

    #[test]
    fn max_steps_exceeded_is_recorded() {
        let p = [1.0];
        let opts = IVPOptions::builder().nmax(3).max_step(1e-3).build();
        let mut s = session(&p, 1.0, &opts);
        let err = s.solve().unwrap_err();
        assert!(matches!(err, Error::MaxStepsExceeded { nmax: 3, .. }));
        assert_eq!(s.status(), Status::Failed);
        assert_eq!(s.failure(), Some(&err));
        assert_eq!(s.trajectory().len(), 3);
        // failed sessions keep failing
        assert_eq!(s.step().unwrap_err(), err);
    }
}
