//! Explicit Runge-Kutta pairs (RK23)

mod rk23;

pub use rk23::RK23;
