//! Errors for integration methods

use crate::Float;

/// Errors returned by the solver, the step integrator and trajectory queries.
///
/// Input validation errors are reported before any step is attempted. Runtime
/// failures (`StepSizeUnderflow`, `MaxStepsExceeded`, `NonFiniteState`) carry
/// the time at which they occurred and leave the trajectory computed so far
/// intact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    InvalidDimension { expected: usize, found: usize },

    #[error("step size {h:e} fell below the minimum step size at t = {t}")]
    StepSizeUnderflow { t: Float, h: Float },

    #[error("maximum number of step attempts ({nmax}) exceeded at t = {t}")]
    MaxStepsExceeded { t: Float, nmax: usize },

    #[error("t = {t} is outside the integrated span [{start}, {end}]")]
    OutOfRange { t: Float, start: Float, end: Float },

    #[error("non-finite state or derivative produced at t = {t}")]
    NonFiniteState { t: Float },

    #[error("tolerances must be finite and non-negative (got {0})")]
    InvalidTolerance(Float),

    #[error("step size must be finite and positive (got {0})")]
    InvalidStepSize(Float),

    #[error("invalid time span: t0 = {t0}, tf = {tf} (tf must be greater than t0)")]
    InvalidTimeSpan { t0: Float, tf: Float },

    #[error("invalid output grid: {0}")]
    InvalidOutputGrid(String),

    #[error("tstops must be finite (got {0})")]
    InvalidStop(Float),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid tableau {name}: {reason}")]
    InvalidTableau { name: &'static str, reason: String },
}

impl Error {
    /// Time attached to a runtime failure or out-of-range query.
    pub fn time(&self) -> Option<Float> {
        match self {
            Error::StepSizeUnderflow { t, .. }
            | Error::MaxStepsExceeded { t, .. }
            | Error::OutOfRange { t, .. }
            | Error::NonFiniteState { t } => Some(*t),
            _ => None,
        }
    }
}

/// Fail with [`Error::InvalidDimension`] unless `found == expected`.
pub(crate) fn check_dim(expected: usize, found: usize) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::InvalidDimension { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_failures_report_their_time() {
        assert_eq!(Error::NonFiniteState { t: 2.5 }.time(), Some(2.5));
        assert_eq!(Error::StepSizeUnderflow { t: 0.0, h: 1e-16 }.time(), Some(0.0));
        assert_eq!(Error::InvalidStepSize(-1.0).time(), None);
    }

    #[test]
    fn display_names_the_span() {
        let msg = Error::OutOfRange { t: 101.0, start: 0.0, end: 100.0 }.to_string();
        assert!(msg.contains("101"));
        assert!(msg.contains("[0, 100]"));
    }
}
