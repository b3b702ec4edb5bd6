//! One adaptive step of an embedded explicit Runge–Kutta method.

use crate::{
    Float,
    core::{ode::ODE, state::weighted_rms, tolerance::Tolerances},
    error::{Error, check_dim},
    methods::{controller::StepController, tableau::ButcherTableau},
    solve::dense::DenseOutputSegment,
};

/// A step that passed the error test.
#[derive(Debug, Clone)]
pub struct AcceptedStep {
    /// Left end of the step.
    pub t: Float,
    /// Step size used for the stages.
    pub h: Float,
    /// Scaled error norm, `<= 1`.
    pub error: Float,
    /// Proposed size of the next step.
    pub h_next: Float,
    /// Continuous extension over the step; its end state is the committed state.
    pub segment: DenseOutputSegment,
}

/// Result of one attempt of [`StepIntegrator::attempt`].
#[derive(Debug, Clone)]
pub enum StepOutcome {
    Accepted(AcceptedStep),
    /// The candidate was discarded; retry from the same point with `h_retry`.
    Rejected { error: Float, h_retry: Float },
}

/// Advances a state by one step of a [`ButcherTableau`] and decides whether
/// the step is accepted.
///
/// An attempt walks through the stages in order (each stage only needs the
/// ones before it), forms the propagated and embedded solutions, measures
/// their difference with the weighted RMS norm and then either accepts the
/// candidate or proposes a smaller step. Only accepted steps pay for the
/// dense-output-only stages.
///
/// The stage derivatives live in scratch buffers owned by the integrator, so
/// one integrator serves one solve at a time.
#[derive(Debug, Clone)]
pub struct StepIntegrator {
    tableau: &'static ButcherTableau,
    tol: Tolerances,
    controller: StepController,
    dim: usize,
    k: Vec<Vec<Float>>,
    ystage: Vec<Float>,
    yhigh: Vec<Float>,
    err: Vec<Float>,
    nfev: usize,
}

impl StepIntegrator {
    pub fn new(
        tableau: &'static ButcherTableau,
        tol: Tolerances,
        controller: StepController,
        dim: usize,
    ) -> Self {
        Self {
            tableau,
            tol,
            controller,
            dim,
            k: vec![vec![0.0; dim]; tableau.total_stages()],
            ystage: vec![0.0; dim],
            yhigh: vec![0.0; dim],
            err: vec![0.0; dim],
            nfev: 0,
        }
    }

    pub fn tableau(&self) -> &'static ButcherTableau {
        self.tableau
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    /// Number of right-hand side evaluations made so far.
    pub fn nfev(&self) -> usize {
        self.nfev
    }

    /// Derivative at the end of the last accepted step.
    ///
    /// This is stage 0 of the next step.
    pub fn end_derivative(&self) -> &[Float] {
        &self.k[self.tableau.fsal]
    }

    /// Attempt one step of size `h` from `(t, y)`.
    ///
    /// `f0` must be the derivative at `(t, y)`. `t_end` is the time the step
    /// lands on when accepted; it is `t + h` except when the step was clamped
    /// onto a boundary, in which case the boundary itself is passed so the
    /// trajectory ends on it exactly.
    #[allow(clippy::too_many_arguments)]
    pub fn attempt<F>(
        &mut self,
        f: &F,
        p: &[Float],
        t: Float,
        y: &[Float],
        f0: &[Float],
        h: Float,
        t_end: Float,
    ) -> Result<StepOutcome, Error>
    where
        F: ODE + ?Sized,
    {
        check_dim(self.dim, y.len())?;
        check_dim(self.dim, f0.len())?;
        let tab = self.tableau;

        self.k[0].copy_from_slice(f0);
        for i in 1..tab.stages {
            let ti = if i == tab.fsal { t_end } else { t + tab.c[i] * h };
            self.stage(f, p, i, ti, y, h)?;
        }

        // Propagated solution and embedded error estimate
        for m in 0..self.dim {
            let mut high = 0.0;
            let mut diff = 0.0;
            for j in 0..tab.stages {
                high += tab.b[j] * self.k[j][m];
                diff += (tab.b[j] - tab.b_hat[j]) * self.k[j][m];
            }
            self.yhigh[m] = y[m] + h * high;
            self.err[m] = h * diff;
        }
        if !self.yhigh.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteState { t: t_end });
        }
        let error = weighted_rms(&self.err, y, &self.yhigh, &self.tol);

        if error > 1.0 {
            let h_retry = h * self.controller.reject_factor(error);
            return Ok(StepOutcome::Rejected { error, h_retry });
        }

        // Dense output stages
        for i in tab.stages..tab.total_stages() {
            if i == tab.fsal {
                self.ystage.copy_from_slice(&self.yhigh);
                f.ode(t_end, &self.ystage, p, &mut self.k[i]);
                self.nfev += 1;
                check_finite(&self.k[i], t_end)?;
            } else {
                self.stage(f, p, i, t + tab.c[i] * h, y, h)?;
            }
        }

        let segment = DenseOutputSegment::from_stages(tab, t, t_end, h, y, &self.yhigh, &self.k);
        Ok(StepOutcome::Accepted(AcceptedStep {
            t,
            h,
            error,
            h_next: h * self.controller.accept_factor(error),
            segment,
        }))
    }

    /// k_i = f(ti, y + h Σ_{j<i} a_ij k_j)
    fn stage<F>(&mut self, f: &F, p: &[Float], i: usize, ti: Float, y: &[Float], h: Float) -> Result<(), Error>
    where
        F: ODE + ?Sized,
    {
        let row = self.tableau.a[i];
        let (done, rest) = self.k.split_at_mut(i);
        for m in 0..self.dim {
            let mut sum = 0.0;
            for (aij, kj) in row.iter().zip(done.iter()) {
                sum += aij * kj[m];
            }
            self.ystage[m] = y[m] + h * sum;
        }
        f.ode(ti, &self.ystage, p, &mut rest[0]);
        self.nfev += 1;
        check_finite(&rest[0], ti)
    }
}

fn check_finite(v: &[Float], t: Float) -> Result<(), Error> {
    if v.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(Error::NonFiniteState { t })
    }
}
