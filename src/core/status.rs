//! Status codes for solver sessions

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// The session can take further steps.
    #[default]
    Running,
    /// The current time reached the final time.
    Completed,
    /// A [`SolOut`](crate::core::solout::SolOut) callback asked to stop.
    Interrupted,
    /// A runtime error halted the solve; the trajectory so far is kept.
    Failed,
}
