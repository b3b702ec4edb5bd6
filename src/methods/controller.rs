//! Step-size controller

use crate::{Error, Float, methods::tableau::ButcherTableau};

/// Elementary (I) step-size controller.
///
/// For an embedded pair whose error estimate is of order `q`:
/// - accepted step: `h_new = h * clamp(safety * err^(-1/(q+1)), scale_min, scale_max)`
/// - rejected step: `h_new = h * max(scale_min, safety * err^(-1/q))`
#[derive(Debug, Clone)]
pub struct StepController {
    /// Safety factor in step-size prediction.
    pub safety: Float,
    /// Smallest allowed ratio `h_new / h`.
    pub scale_min: Float,
    /// Largest allowed ratio `h_new / h`.
    pub scale_max: Float,
    accept_exponent: Float,
    reject_exponent: Float,
}

impl StepController {
    pub fn new(
        tableau: &ButcherTableau,
        safety: Float,
        scale_min: Float,
        scale_max: Float,
    ) -> Result<Self, Error> {
        if !(safety > 1e-4 && safety < 1.0) {
            return Err(Error::InvalidSettings(format!(
                "safety_factor must be in (1e-4, 1.0) (got {})",
                safety
            )));
        }
        if !(scale_min > 0.0 && scale_min < 1.0 && scale_max > 1.0 && scale_max.is_finite()) {
            return Err(Error::InvalidSettings(format!(
                "step scale factors must satisfy 0 < scale_min < 1 < scale_max (got {}, {})",
                scale_min, scale_max
            )));
        }
        let q = tableau.embedded_order as Float;
        Ok(Self {
            safety,
            scale_min,
            scale_max,
            accept_exponent: 1.0 / (q + 1.0),
            reject_exponent: 1.0 / q,
        })
    }

    /// Ratio `h_new / h` after an accepted step with error norm `err <= 1`.
    pub fn accept_factor(&self, err: Float) -> Float {
        if err == 0.0 {
            return self.scale_max;
        }
        (self.safety * err.powf(-self.accept_exponent)).clamp(self.scale_min, self.scale_max)
    }

    /// Ratio `h_new / h` after a rejected step with error norm `err > 1`.
    ///
    /// Always below `safety`, so retries shrink strictly.
    pub fn reject_factor(&self, err: Float) -> Float {
        (self.safety * err.powf(-self.reject_exponent)).max(self.scale_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::DOP853;
    use approx::assert_relative_eq;

    fn controller() -> StepController {
        StepController::new(&DOP853, 0.9, 0.2, 5.0).unwrap()
    }

    #[test]
    fn factors_are_clamped() {
        let c = controller();
        assert_eq!(c.accept_factor(0.0), 5.0);
        assert_eq!(c.accept_factor(1e-30), 5.0);
        assert_relative_eq!(c.accept_factor(1.0), 0.9);
        assert_eq!(c.reject_factor(1e30), 0.2);
        assert_eq!(c.reject_factor(Float::INFINITY), 0.2);
    }

    #[test]
    fn rejection_always_shrinks() {
        let c = controller();
        for err in [1.0 + 1e-12, 1.5, 10.0, 1e6] {
            let f = c.reject_factor(err);
            assert!(f < 1.0 && f >= 0.2, "factor {} for err {}", f, err);
        }
    }

    #[test]
    fn exponents_follow_embedded_order() {
        let c = controller();
        // q = 5 for DOP853
        assert_relative_eq!(c.accept_factor(0.5), 0.9 * 0.5_f64.powf(-1.0 / 6.0), max_relative = 1e-14);
        assert_relative_eq!(c.reject_factor(2.0), 0.9 * 2.0_f64.powf(-1.0 / 5.0), max_relative = 1e-14);
    }

    #[test]
    fn invalid_settings() {
        assert!(StepController::new(&DOP853, 1.0, 0.2, 5.0).is_err());
        assert!(StepController::new(&DOP853, 0.9, 0.0, 5.0).is_err());
        assert!(StepController::new(&DOP853, 0.9, 0.2, 1.0).is_err());
    }
}
