//! Butcher tableaus for embedded explicit Runge–Kutta pairs with dense output.

use crate::{Error, Float};

/// Coefficients of an embedded explicit Runge–Kutta method.
///
/// Stages `0..stages` advance the solution and produce the error estimate.
/// Stages `stages..c.len()` are only evaluated after a step is accepted and
/// feed the continuous extension. Row `i` of `a` has exactly `i` entries, so
/// every method described by this type is explicit.
///
/// Stage `fsal` must be the derivative at the end of the step,
/// `f(t + h, y + h Σ b_j k_j)`. It becomes stage 0 of the next step and the
/// right-end slope of the interpolant.
///
/// The continuous extension has the form
///
/// ```text
/// y(t0 + θh) = c0 + θ(c1 + (1-θ)(c2 + θ(c3 + (1-θ)(c4 + θ(c5 + ...)))))
/// c0 = y0, c1 = y1 - y0, c2 = h k_0 - c1, c3 = c1 - h k_fsal - c2,
/// c(4+r) = h Σ_j dense[r][j] k_j
/// ```
///
/// which is the cubic Hermite interpolant when `dense` is empty.
#[derive(Debug)]
pub struct ButcherTableau {
    pub name: &'static str,
    /// Order of the propagated solution.
    pub order: usize,
    /// Order of the embedded solution used for error estimation.
    pub embedded_order: usize,
    /// Number of stages used to advance the solution.
    pub stages: usize,
    /// Index of the first-same-as-last stage.
    pub fsal: usize,
    pub c: &'static [Float],
    pub a: &'static [&'static [Float]],
    pub b: &'static [Float],
    pub b_hat: &'static [Float],
    pub dense: &'static [&'static [Float]],
}

impl ButcherTableau {
    /// Total number of stages including the dense-output-only ones.
    pub fn total_stages(&self) -> usize {
        self.c.len()
    }

    /// Number of continuous-extension coefficient vectors per step.
    pub fn dense_coefficients(&self) -> usize {
        4 + self.dense.len()
    }

    /// Check the structural and consistency requirements of the tableau.
    ///
    /// `tol` bounds the residual of the order conditions
    /// `Σ_j a_ij = c_i`, `Σ b = 1` and `Σ b_hat = 1`.
    pub fn validate(&self, tol: Float) -> Result<(), Error> {
        let fail = |reason: String| Error::InvalidTableau {
            name: self.name,
            reason,
        };
        let total = self.total_stages();

        if self.stages == 0 || self.stages > total {
            return Err(fail(format!("{} stepping stages for {} nodes", self.stages, total)));
        }
        if self.a.len() != total {
            return Err(fail(format!("{} rows in a for {} nodes", self.a.len(), total)));
        }
        if self.b.len() != self.stages || self.b_hat.len() != self.stages {
            return Err(fail("weights must cover exactly the stepping stages".into()));
        }
        if self.fsal >= total || self.fsal == 0 {
            return Err(fail(format!("fsal stage {} out of range", self.fsal)));
        }
        if self.embedded_order == 0 || self.embedded_order >= self.order {
            return Err(fail("embedded order must be in [1, order)".into()));
        }
        if self.c[0] != 0.0 {
            return Err(fail("the first node must be zero".into()));
        }

        for (i, row) in self.a.iter().enumerate() {
            if row.len() != i {
                return Err(fail(format!("row {} has {} entries; explicit rows have {}", i, row.len(), i)));
            }
            let residual = row.iter().sum::<Float>() - self.c[i];
            if residual.abs() > tol {
                return Err(fail(format!("row {} sums to c + {:e}", i, residual)));
            }
        }

        // The fsal stage must evaluate at y + h Σ b_j k_j.
        if self.c[self.fsal] != 1.0 {
            return Err(fail("fsal stage must sit at c = 1".into()));
        }
        let fsal_row = self.a[self.fsal];
        for (j, &bj) in self.b.iter().enumerate() {
            let aj = fsal_row.get(j).copied().unwrap_or(0.0);
            if aj != bj {
                return Err(fail(format!("fsal row differs from b at stage {}", j)));
            }
        }
        if fsal_row.iter().skip(self.stages).any(|&v| v != 0.0) {
            return Err(fail("fsal row references dense-only stages".into()));
        }

        for (label, weights) in [("b", self.b), ("b_hat", self.b_hat)] {
            let residual = weights.iter().sum::<Float>() - 1.0;
            if residual.abs() > tol {
                return Err(fail(format!("{} sums to 1 + {:e}", label, residual)));
            }
        }

        for (r, row) in self.dense.iter().enumerate() {
            if row.len() > total {
                return Err(fail(format!("dense row {} references missing stages", r)));
            }
        }

        Ok(())
    }
}
