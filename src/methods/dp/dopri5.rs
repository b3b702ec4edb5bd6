//! DOPRI5 - Dormand–Prince 5(4) explicit Runge–Kutta pair with a 4th order
//! continuous extension.
//!
//! Reference
//! - E. Hairer, S. P. Nørsett, and G. Wanner, "Solving Ordinary Differential
//!   Equations I. Nonstiff Problems", 2nd ed., Springer (1993).

use crate::{Float, methods::tableau::ButcherTableau};

/// Dormand–Prince 5(4). Stage 7 is evaluated at the end of the step and is
/// reused as stage 1 of the next one.
pub static DOPRI5: ButcherTableau = ButcherTableau {
    name: "DOPRI5",
    order: 5,
    embedded_order: 4,
    stages: 7,
    fsal: 6,
    c: &[0.0, C2, C3, C4, C5, 1.0, 1.0],
    a: &[
        &[],
        &[A21],
        &[A31, A32],
        &[A41, A42, A43],
        &[A51, A52, A53, A54],
        &[A61, A62, A63, A64, A65],
        &[A71, 0.0, A73, A74, A75, A76],
    ],
    b: &[A71, 0.0, A73, A74, A75, A76, 0.0],
    b_hat: &[A71 - E1, 0.0, A73 - E3, A74 - E4, A75 - E5, A76 - E6, -E7],
    dense: &[&[D1, 0.0, D3, D4, D5, D6, D7]],
};

const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

// b - b_hat
const E1: Float = 71.0 / 57600.0;
const E3: Float = -71.0 / 16695.0;
const E4: Float = 71.0 / 1920.0;
const E5: Float = -17253.0 / 339200.0;
const E6: Float = 22.0 / 525.0;
const E7: Float = -1.0 / 40.0;

const D1: Float = -12715105075.0 / 11282082432.0;
const D3: Float = 87487479700.0 / 32700410799.0;
const D4: Float = -10690763975.0 / 1880347072.0;
const D5: Float = 701980252875.0 / 199316789632.0;
const D6: Float = -1453857185.0 / 822651844.0;
const D7: Float = 69997945.0 / 29380423.0;
