//! Thin convenience entry point over the orchestrator and validator that
//! hides the internal crate split from callers.

use shiftforge_core::{Result, Schedule, SchedulingInput, Solver, SolverParams};
use shiftforge_solver::{validate, ValidationReport};

/// Runs one scheduling request against `solver` and validates the result.
///
/// This is [`shiftforge_solver::run`] followed by [`shiftforge_solver::validate`]
/// in sequence - the composition most callers want, without needing to
/// depend on `shiftforge-solver` directly.
pub fn solve(
    schedule_id: impl AsRef<str>,
    solver: &mut dyn Solver,
    input: &SchedulingInput,
    params: &SolverParams,
) -> Result<(Schedule, ValidationReport)> {
    let schedule = shiftforge_solver::run(schedule_id, solver, input, params)?;
    let report = validate(&schedule, input);
    Ok((schedule, report))
}
