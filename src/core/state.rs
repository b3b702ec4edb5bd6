//! Fixed-dimension state vectors and the weighted error norm.

use std::ops::Deref;

use crate::{
    Float,
    core::tolerance::Tolerances,
    error::{Error, check_dim},
};

/// An ordered, fixed-dimension vector of reals.
///
/// Arithmetic always produces a new vector; operations between vectors of
/// different dimension fail with [`Error::InvalidDimension`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateVector(Vec<Float>);

impl StateVector {
    pub fn new(values: Vec<Float>) -> Self {
        Self(values)
    }

    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Float> {
        self.0
    }

    /// `true` when every component is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Elementwise sum.
    pub fn add(&self, other: &StateVector) -> Result<StateVector, Error> {
        check_dim(self.dim(), other.dim())?;
        Ok(Self(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect()))
    }

    /// Multiply every component by `c`.
    pub fn scale(&self, c: Float) -> StateVector {
        Self(self.0.iter().map(|v| c * v).collect())
    }

    /// Linear combination `Σ coeffs[i] * vectors[i]`.
    ///
    /// Every vector must share the dimension of the first one and there must be
    /// exactly one coefficient per vector. An empty combination is the empty
    /// vector.
    pub fn linear_combination(
        coeffs: &[Float],
        vectors: &[&StateVector],
    ) -> Result<StateVector, Error> {
        check_dim(vectors.len(), coeffs.len())?;
        let Some(first) = vectors.first() else {
            return Ok(Self::default());
        };
        let mut out = vec![0.0; first.dim()];
        for (&c, v) in coeffs.iter().zip(vectors) {
            check_dim(out.len(), v.dim())?;
            for (o, x) in out.iter_mut().zip(&v.0) {
                *o += c * x;
            }
        }
        Ok(Self(out))
    }

    /// Weighted root-mean-square norm of `self`, treated as an error vector
    /// between the states `y_old` and `y_new`.
    ///
    /// The weight of component `i` is `atol_i + rtol_i * max(|y_old_i|, |y_new_i|)`.
    pub fn weighted_rms_norm(
        &self,
        y_old: &[Float],
        y_new: &[Float],
        tol: &Tolerances,
    ) -> Result<Float, Error> {
        check_dim(self.dim(), y_old.len())?;
        check_dim(self.dim(), y_new.len())?;
        tol.check_dim(self.dim())?;
        Ok(weighted_rms(&self.0, y_old, y_new, tol))
    }
}

/// Slice form of [`StateVector::weighted_rms_norm`] used inside the step loop.
///
/// Callers guarantee equal lengths. A zero error component contributes zero
/// even under a zero weight; a nonzero one over a zero weight yields `inf`.
pub(crate) fn weighted_rms(err: &[Float], y_old: &[Float], y_new: &[Float], tol: &Tolerances) -> Float {
    let n = err.len();
    if n == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        if err[i] == 0.0 {
            continue;
        }
        let ratio = err[i] / tol.weight(i, y_old[i], y_new[i]);
        sum += ratio * ratio;
    }
    (sum / n as Float).sqrt()
}

impl Deref for StateVector {
    type Target = [Float];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[Float]> for StateVector {
    fn as_ref(&self) -> &[Float] {
        &self.0
    }
}

impl From<Vec<Float>> for StateVector {
    fn from(val: Vec<Float>) -> Self {
        Self(val)
    }
}

impl From<&[Float]> for StateVector {
    fn from(val: &[Float]) -> Self {
        Self(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for StateVector {
    fn from(val: [Float; N]) -> Self {
        Self(val.to_vec())
    }
}

impl From<StateVector> for Vec<Float> {
    fn from(val: StateVector) -> Self {
        val.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn arithmetic() {
        let a = StateVector::from([1.0, 2.0]);
        let b = StateVector::from([0.5, -1.0]);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[1.5, 1.0]);
        assert_eq!(a.scale(-2.0).as_slice(), &[-2.0, -4.0]);

        let c = StateVector::linear_combination(&[2.0, 4.0], &[&a, &b]).unwrap();
        assert_eq!(c.as_slice(), &[4.0, 0.0]);
    }

    #[test]
    fn mismatched_dimensions_fail_fast() {
        let a = StateVector::from([1.0, 2.0]);
        let b = StateVector::from([1.0, 2.0, 3.0]);
        assert_eq!(
            a.add(&b),
            Err(Error::InvalidDimension { expected: 2, found: 3 })
        );
        assert!(matches!(
            StateVector::linear_combination(&[1.0, 1.0], &[&a, &b]),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            StateVector::linear_combination(&[1.0], &[&a, &a]),
            Err(Error::InvalidDimension { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn weighted_rms_norm_uses_larger_magnitude() {
        let tol = Tolerances::new(1e-3, 1e-2);
        let err = StateVector::from([1e-3, 0.0]);
        // weight_0 = 1e-3 + 1e-2 * max(1, 2) = 0.021
        let norm = err.weighted_rms_norm(&[1.0, 5.0], &[2.0, 5.0], &tol).unwrap();
        assert_relative_eq!(norm, ((1e-3_f64 / 0.021).powi(2) / 2.0).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn zero_tolerance_norm() {
        let tol = Tolerances::new(0.0, 0.0);
        let exact = StateVector::zeros(2);
        assert_eq!(exact.weighted_rms_norm(&[1.0, 1.0], &[1.0, 1.0], &tol).unwrap(), 0.0);

        let err = StateVector::from([1e-300, 0.0]);
        assert!(err.weighted_rms_norm(&[1.0, 1.0], &[1.0, 1.0], &tol).unwrap().is_infinite());
    }
}
