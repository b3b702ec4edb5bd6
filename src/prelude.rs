//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use dense_ivp::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits and types: `ODE`, `Interpolate`, `SolOut`, `ControlFlag`, `Status`, `StateVector`, `Tolerance`.
//! - Methods: the `DOP853`, `DOPRI5` and `RK23` tableaus.
//! - High-level API: `solve_ivp`, `SolverSession`, `IVPOptions`, `IVPSolution`, `Method`, `OutputGrid`.
//!

pub use crate::Error;
pub use crate::core::{
    interpolate::Interpolate,
    ode::ODE,
    solout::{CancelToken, ControlFlag, DummySolOut, SolOut},
    state::StateVector,
    status::Status,
    tolerance::{Tolerance, Tolerances},
};
pub use crate::methods::{ButcherTableau, DOP853, DOPRI5, RK23};
pub use crate::solve::{
    DenseOutputSegment, IVPOptions, IVPSolution, Method, OutputGrid, SolverSession, Stats, Trajectory,
    solve_ivp, solve_ivp_with,
};
