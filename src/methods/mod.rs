//! Numerical methods

pub(crate) mod hinit;

pub mod controller;
pub mod dp;
pub mod rk;
pub mod step;
pub mod tableau;

pub use dp::{DOP853, DOPRI5};
pub use rk::RK23;
pub use tableau::ButcherTableau;
