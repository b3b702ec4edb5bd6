//! SciPy-like solve_ivp entry point implementation

use crate::{
    Float,
    core::{
        ode::ODE,
        solout::{DummySolOut, SolOut},
        state::StateVector,
    },
    error::Error,
};

use super::{options::IVPOptions, session::SolverSession, solution::IVPSolution};

/// Solve an initial value problem with SciPy-like options.
///
/// Integrates `dy/dt = f(t, y, params)` from `y(t0) = y0` to `tf` and reports
/// the solution on `options.saveat`, or at `t0` and every accepted step
/// endpoint when no grid is given.
///
/// Only forward integration is supported: `tf` must be greater than `t0`,
/// otherwise the call fails with [`Error::InvalidTimeSpan`].
///
/// Invalid input is reported as `Err` before any step is taken. A solve that
/// starts but cannot finish still returns `Ok`: the solution then has
/// [`Status::Failed`](crate::core::status::Status::Failed), the error in
/// `failure`, and everything computed up to the failure point.
pub fn solve_ivp<F>(
    f: &F,
    t0: Float,
    tf: Float,
    y0: &[Float],
    params: &[Float],
    options: IVPOptions,
) -> Result<IVPSolution, Error>
where
    F: ODE + ?Sized,
{
    solve_ivp_with(f, t0, tf, y0, params, options, &mut DummySolOut)
}

/// [`solve_ivp`] with a callback invoked after every accepted step.
///
/// Returning [`ControlFlag::Interrupt`](crate::core::solout::ControlFlag::Interrupt)
/// from the callback ends the solve with
/// [`Status::Interrupted`](crate::core::status::Status::Interrupted).
pub fn solve_ivp_with<F, S>(
    f: &F,
    t0: Float,
    tf: Float,
    y0: &[Float],
    params: &[Float],
    options: IVPOptions,
    solout: &mut S,
) -> Result<IVPSolution, Error>
where
    F: ODE + ?Sized,
    S: SolOut,
{
    let grid = match &options.saveat {
        Some(grid) => Some(grid.resolve(t0, tf)?),
        None => None,
    };

    let mut session = SolverSession::new(f, t0, tf, y0, params, &options)?;
    let failure = session.solve_with(solout).err();
    let status = session.status();
    let stats = session.stats();
    let trajectory = session.into_trajectory();

    let (t, y): (Vec<Float>, Vec<StateVector>) = match grid {
        Some(times) => {
            let end = trajectory.t_end();
            let covered: Vec<Float> = times.into_iter().take_while(|&t| t <= end).collect();
            trajectory.sample(&covered)?.into_iter().unzip()
        }
        None => {
            let mut t = vec![t0];
            let mut y = vec![StateVector::from(y0)];
            for segment in &trajectory {
                t.push(segment.t_end());
                y.push(segment.y_end().clone());
            }
            (t, y)
        }
    };

    Ok(IVPSolution {
        t,
        y,
        stats,
        status,
        failure,
        trajectory,
    })
}
