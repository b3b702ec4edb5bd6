//! Adaptive-step embedded explicit Runge–Kutta integration of initial value
//! problems, with dense output over every accepted step and resampling onto a
//! fixed output grid.
//!
//! ```rust
//! use dense_ivp::prelude::*;
//!
//! struct Decay;
//!
//! impl ODE for Decay {
//!     fn ode(&self, _t: f64, y: &[f64], p: &[f64], dydt: &mut [f64]) {
//!         dydt[0] = -p[0] * y[0];
//!     }
//! }
//!
//! let options = IVPOptions::builder().rtol(1e-10).atol(1e-10).saveat(0.5).build();
//! let sol = solve_ivp(&Decay, 0.0, 2.0, &[1.0], &[1.0], options).unwrap();
//! assert_eq!(sol.status, Status::Completed);
//! assert!((sol.y.last().unwrap()[0] - (-2.0f64).exp()).abs() < 1e-9);
//! ```

mod error;

pub mod core;
pub mod methods;
pub mod prelude;
pub mod solve;

pub use error::Error;

/// Floating point type used for times and states.
pub type Float = f64;
