//! Tolerance abstraction to allow scalar or vector tolerances

use std::ops::Index;

use crate::{
    Float,
    error::{Error, check_dim},
};

/// Tolerance enum to allow scalar or vector tolerances
/// using [`Into`] trait for easy conversion from `Float`, `[Float; N]`, or `Vec<Float>`
/// users do not need to know or worry this simply allows both
/// `Float` and `[Float; N]` to be passed in as arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    fn validate(&self, n: usize) -> Result<(), Error> {
        let values = match self {
            Tolerance::Scalar(v) => std::slice::from_ref(v),
            Tolerance::Vector(vs) => {
                check_dim(n, vs.len())?;
                vs.as_slice()
            }
        };
        match values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            Some(&bad) => Err(Error::InvalidTolerance(bad)),
            None => Ok(()),
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}

/// Absolute and relative tolerance pair, fixed for the lifetime of a solve.
#[derive(Clone, Debug, PartialEq)]
pub struct Tolerances {
    pub atol: Tolerance,
    pub rtol: Tolerance,
}

impl Tolerances {
    pub fn new(atol: impl Into<Tolerance>, rtol: impl Into<Tolerance>) -> Self {
        Self {
            atol: atol.into(),
            rtol: rtol.into(),
        }
    }

    /// Check that both tolerances are finite, non-negative and, when given
    /// per component, sized for a state of dimension `n`.
    pub fn validate(&self, n: usize) -> Result<(), Error> {
        self.atol.validate(n)?;
        self.rtol.validate(n)
    }

    pub(crate) fn check_dim(&self, n: usize) -> Result<(), Error> {
        for tol in [&self.atol, &self.rtol] {
            if let Tolerance::Vector(vs) = tol {
                check_dim(n, vs.len())?;
            }
        }
        Ok(())
    }

    /// Error weight of component `i` between two consecutive states.
    #[inline]
    pub fn weight(&self, i: usize, y_old: Float, y_new: Float) -> Float {
        self.atol[i] + self.rtol[i] * y_old.abs().max(y_new.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_vector_indexing() {
        let tol = Tolerances::new(1e-6, [1e-3, 1e-4]);
        assert_eq!(tol.atol[1], 1e-6);
        assert_eq!(tol.rtol[1], 1e-4);
        assert_eq!(tol.weight(0, -2.0, 1.0), 1e-6 + 2e-3);
    }

    #[test]
    fn validation() {
        assert!(Tolerances::new(0.0, 0.0).validate(3).is_ok());
        assert_eq!(
            Tolerances::new(-1e-6, 1e-6).validate(1),
            Err(Error::InvalidTolerance(-1e-6))
        );
        assert!(matches!(
            Tolerances::new(1e-6, Float::NAN).validate(1),
            Err(Error::InvalidTolerance(_))
        ));
        assert_eq!(
            Tolerances::new(vec![1e-6; 2], 1e-6).validate(3),
            Err(Error::InvalidDimension { expected: 3, found: 2 })
        );
    }
}
