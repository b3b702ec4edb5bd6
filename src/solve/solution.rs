//! Rich solution type for solve_ivp: sampled data, stats, and dense evaluation helpers.

use crate::{
    Float,
    core::{state::StateVector, status::Status},
    error::Error,
};

use super::trajectory::Trajectory;

/// Work counters of a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Right-hand side evaluations, including the setup ones.
    pub nfev: usize,
    /// Step attempts, `naccpt + nrejct`.
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
}

/// Rich solution of solve_ivp: sampled data plus basic stats
#[derive(Debug, Clone)]
pub struct IVPSolution {
    pub t: Vec<Float>,
    pub y: Vec<StateVector>,
    pub stats: Stats,
    pub status: Status,
    /// Set when `status` is [`Status::Failed`].
    pub failure: Option<Error>,
    /// Continuous solution over everything integrated, up to the failure
    /// point when the solve did not complete.
    pub trajectory: Trajectory,
}

impl IVPSolution {
    /// `true` when the final time was reached.
    pub fn is_success(&self) -> bool {
        self.status == Status::Completed
    }

    /// Evaluate the continuous solution at a single time t.
    pub fn sol(&self, t: Float) -> Result<StateVector, Error> {
        self.trajectory.query(t)
    }

    /// Evaluate the continuous solution at many time points.
    pub fn sol_many(&self, ts: &[Float]) -> Result<Vec<StateVector>, Error> {
        ts.iter().map(|&t| self.trajectory.query(t)).collect()
    }

    /// Time span covered by the continuous solution.
    pub fn sol_span(&self) -> (Float, Float) {
        self.trajectory.t_span()
    }

    /// Iterate over stored sample pairs (t_i, y_i) from the discrete output.
    pub fn iter(&self) -> SolutionIter<'_> {
        SolutionIter {
            t_iter: self.t.iter(),
            y_iter: self.y.iter(),
        }
    }
}

/// Iterator over (t, y) pairs of stored samples in an IVPSolution.
pub struct SolutionIter<'a> {
    t_iter: std::slice::Iter<'a, Float>,
    y_iter: std::slice::Iter<'a, StateVector>,
}

impl<'a> Iterator for SolutionIter<'a> {
    type Item = (Float, &'a [Float]);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.t_iter.next(), self.y_iter.next()) {
            (Some(&t), Some(y)) => Some((t, y.as_slice())),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a IVPSolution {
    type Item = (Float, &'a [Float]);
    type IntoIter = SolutionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
