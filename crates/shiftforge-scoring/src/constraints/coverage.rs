//! Coverage (§4.5.1) and worker-restriction (§4.5.2): both structural,
//! always-on constraints, never part of the registry. Coverage is hard by
//! definition — `coverage[p,s] = workers_required` for every active
//! (period, shift) — and is never softened into a penalty.

use shiftforge_core::{Result, SchedulingInput, Solver, VariableBuilder};

/// Coverage (§4.5.1): each active shift in each period is staffed at
/// exactly `workers_required`. Always enabled, never configurable, never
/// relaxed into a soft violation — a caller cannot disable or soften it
/// via `constraint_configs`.
pub fn apply_coverage(solver: &mut dyn Solver, vars: &VariableBuilder, input: &SchedulingInput) -> Result<()> {
    for (_, shift) in &input.shift_types {
        for p in 0..input.num_periods() {
            let weekdays = input.calendar.weekdays_in_period(p);
            if !weekdays.into_iter().any(|wd| shift.applies_on(wd)) {
                continue;
            }
            let coverage = vars.coverage_terms(input, p, &shift.id)?;
            solver.add_linear_eq(&coverage, shift.workers_required as i64);
        }
    }
    Ok(())
}

/// Worker-restriction (§4.5.2): a structural, always-on constraint, not
/// part of the registry — applied once per model build regardless of
/// configuration.
pub fn apply_worker_restriction(
    solver: &mut dyn Solver,
    vars: &VariableBuilder,
    input: &SchedulingInput,
) -> Result<()> {
    for worker in input.workers.values() {
        for (_, shift) in &input.shift_types {
            if !worker.is_restricted_from(&shift.id) {
                continue;
            }
            for p in 0..input.num_periods() {
                let x = vars.x(input, &worker.id, p, &shift.id)?;
                solver.add_linear_eq(&[(x, 1)], 0);
            }
        }
    }
    Ok(())
}

/// Applies both structural constraints (§4.5.1, §4.5.2) to the model.
/// These run unconditionally, before the registry-driven pluggable
/// constraints, and cannot be disabled or softened by a caller.
pub fn apply_structural(solver: &mut dyn Solver, vars: &VariableBuilder, input: &SchedulingInput) -> Result<()> {
    apply_coverage(solver, vars, input)?;
    apply_worker_restriction(solver, vars, input)?;
    Ok(())
}
