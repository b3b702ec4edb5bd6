//! Bogacki–Shampine 3(2) pair (RK23).
//!
//! Reference
//! - P. Bogacki and L. F. Shampine, "A 3(2) pair of Runge-Kutta formulas",
//!   Appl. Math. Letters 2 (1989).

use crate::{Float, methods::tableau::ButcherTableau};

/// Bogacki–Shampine 3(2) with the cubic Hermite interpolant as dense output.
pub static RK23: ButcherTableau = ButcherTableau {
    name: "RK23",
    order: 3,
    embedded_order: 2,
    stages: 4,
    fsal: 3,
    c: &[0.0, C2, C3, 1.0],
    a: &[&[], &[A21], &[0.0, A32], &[B1, B2, B3]],
    b: &[B1, B2, B3, 0.0],
    b_hat: &[BH1, BH2, BH3, BH4],
    dense: &[],
};

const C2: Float = 0.5;
const C3: Float = 0.75;

const A21: Float = 0.5;
const A32: Float = 0.75;

const B1: Float = 2.0 / 9.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 4.0 / 9.0;

const BH1: Float = 7.0 / 24.0;
const BH2: Float = 1.0 / 4.0;
const BH3: Float = 1.0 / 3.0;
const BH4: Float = 1.0 / 8.0;
