//! High-level solve module: SciPy-like API pieces split into submodules.

pub mod dense;
pub mod options;
pub mod session;
pub mod solution;
pub mod solve_ivp;
pub mod trajectory;

// Re-exports for ergonomic access via crate::solve::* and prelude
pub use dense::DenseOutputSegment;
pub use options::{IVPOptions, Method, OutputGrid};
pub use session::SolverSession;
pub use solution::{IVPSolution, SolutionIter, Stats};
pub use solve_ivp::{solve_ivp, solve_ivp_with};
pub use trajectory::Trajectory;
