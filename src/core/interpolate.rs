//! Interpolation trait

use crate::{Error, Float};

/// Trait for interpolating the solution within a step.
pub trait Interpolate {
    /// Interpolate the solution at `t` into `yi`.
    ///
    /// Fails with [`Error::OutOfRange`] when `t` is outside the covered span and
    /// with [`Error::InvalidDimension`] when `yi` has the wrong length.
    fn interpolate(&self, t: Float, yi: &mut [Float]) -> Result<(), Error>;
}
