//! Dormand-Prince Runge Kutta methods

mod dop853;
mod dopri5;

pub use dop853::DOP853;
pub use dopri5::DOPRI5;
