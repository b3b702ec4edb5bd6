//! Continuous output over a single accepted step.

use crate::{
    Float,
    core::{interpolate::Interpolate, state::StateVector},
    error::{Error, check_dim},
    methods::tableau::ButcherTableau,
};

/// Dense output for one accepted step.
///
/// Holds the continuous-extension coefficients derived from the stage
/// derivatives of the step (see [`ButcherTableau`] for the polynomial form),
/// so evaluating it never calls the right-hand side again.
#[derive(Debug, Clone)]
pub struct DenseOutputSegment {
    t_start: Float,
    t_end: Float,
    h: Float,
    y_start: StateVector,
    y_end: StateVector,
    /// Coefficient-major: `cont[c * n + i]` is coefficient `c` of component `i`.
    cont: Vec<Float>,
    ncoef: usize,
}

impl DenseOutputSegment {
    /// Build the segment of an accepted step from its stage derivatives `k`.
    pub(crate) fn from_stages(
        tableau: &ButcherTableau,
        t_start: Float,
        t_end: Float,
        h: Float,
        y: &[Float],
        y_new: &[Float],
        k: &[Vec<Float>],
    ) -> Self {
        let n = y.len();
        let ncoef = tableau.dense_coefficients();
        let mut cont = vec![0.0; ncoef * n];
        for i in 0..n {
            let ydiff = y_new[i] - y[i];
            let bspl = h * k[0][i] - ydiff;
            cont[i] = y[i];
            cont[n + i] = ydiff;
            cont[2 * n + i] = bspl;
            cont[3 * n + i] = ydiff - h * k[tableau.fsal][i] - bspl;
            for (r, row) in tableau.dense.iter().enumerate() {
                let mut sum = 0.0;
                for (dj, kj) in row.iter().zip(k) {
                    sum += dj * kj[i];
                }
                cont[(4 + r) * n + i] = h * sum;
            }
        }
        Self {
            t_start,
            t_end,
            h,
            y_start: StateVector::from(y),
            y_end: StateVector::from(y_new),
            cont,
            ncoef,
        }
    }

    pub fn t_start(&self) -> Float {
        self.t_start
    }

    pub fn t_end(&self) -> Float {
        self.t_end
    }

    /// Step size the stages were computed with.
    pub fn h(&self) -> Float {
        self.h
    }

    pub fn y_start(&self) -> &StateVector {
        &self.y_start
    }

    /// The committed state at the end of the step.
    pub fn y_end(&self) -> &StateVector {
        &self.y_end
    }

    pub fn dim(&self) -> usize {
        self.y_start.dim()
    }

    pub fn contains(&self, t: Float) -> bool {
        t >= self.t_start && t <= self.t_end
    }

    /// Approximate y(t) for `t` in `[t_start, t_end]`.
    ///
    /// Returns the start state and the committed end state exactly at the two
    /// ends of the step.
    pub fn evaluate(&self, t: Float) -> Result<StateVector, Error> {
        let mut yi = vec![0.0; self.dim()];
        self.interpolate(t, &mut yi)?;
        Ok(StateVector::new(yi))
    }
}

impl Interpolate for DenseOutputSegment {
    fn interpolate(&self, t: Float, yi: &mut [Float]) -> Result<(), Error> {
        let n = self.dim();
        check_dim(n, yi.len())?;
        if !self.contains(t) {
            return Err(Error::OutOfRange {
                t,
                start: self.t_start,
                end: self.t_end,
            });
        }
        if t == self.t_start {
            yi.copy_from_slice(&self.y_start);
            return Ok(());
        }
        if t == self.t_end {
            yi.copy_from_slice(&self.y_end);
            return Ok(());
        }

        let s = (t - self.t_start) / self.h;
        let s1 = 1.0 - s;
        for i in 0..n {
            // c0 + s(c1 + s1(c2 + s(c3 + s1(c4 + ...)))), innermost first
            let mut acc = self.cont[(self.ncoef - 1) * n + i];
            for c in (0..self.ncoef - 1).rev() {
                let w = if c % 2 == 0 { s } else { s1 };
                acc = self.cont[c * n + i] + w * acc;
            }
            yi[i] = acc;
        }
        Ok(())
    }
}
