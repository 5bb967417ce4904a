//! Solver orchestrator (§4.8): drives one scheduling run through
//! `Init -> PreCheck -> Build -> Solve -> Extract -> Done`.

use tracing::{error, info, instrument};

use shiftforge_core::{feasibility, Result, Schedule, SchedulingInput, Solver, SolverParams, VariableBuilder};
use shiftforge_scoring::{apply_structural_constraints, build_objective, Registry};

use crate::extractor;
use crate::state::OrchestratorState;

/// Runs one scheduling request to completion against any backend
/// implementing [`Solver`] (§4.2). `schedule_id` is assigned by the caller —
/// the core never invents identifiers (§1).
#[instrument(skip(solver, input, params), fields(schedule_id = %schedule_id.as_ref()))]
pub fn run(
    schedule_id: impl AsRef<str>,
    solver: &mut dyn Solver,
    input: &SchedulingInput,
    params: &SolverParams,
) -> Result<Schedule> {
    info!(state = %OrchestratorState::Init, "starting scheduling run");

    info!(state = %OrchestratorState::PreCheck, "running pre-solve feasibility checks");
    let issues = feasibility::check(input);
    let fatal: Vec<_> = issues
        .into_iter()
        .filter(|i| i.severity == shiftforge_core::Severity::Fatal)
        .collect();
    if !fatal.is_empty() {
        error!(
            state = %OrchestratorState::PreCheck,
            issue_count = fatal.len(),
            "model is infeasible before solving"
        );
        let schedule = extractor::extract_presolve_infeasible(schedule_id.as_ref(), input, &fatal);
        info!(state = %OrchestratorState::Done, status = ?schedule.status, "scheduling run complete");
        return Ok(schedule);
    }

    info!(state = %OrchestratorState::Build, "building variables and constraints");
    let vars = VariableBuilder::build(solver, input);
    apply_structural_constraints(solver, &vars, input)?;
    let registry = Registry::standard();
    let per_constraint = registry.apply_all(solver, &vars, input)?;
    let metadata = build_objective(solver, per_constraint);

    info!(state = %OrchestratorState::Solve, time_limit_seconds = params.time_limit_seconds, "solving");
    let outcome = solver.solve(params)?;
    info!(state = %OrchestratorState::Solve, status = ?outcome.status, wall_time_ms = outcome.wall_time.as_millis() as u64, "solve finished");

    info!(state = %OrchestratorState::Extract, "extracting schedule");
    let schedule = match outcome.status {
        shiftforge_core::SolveStatusCode::Optimal | shiftforge_core::SolveStatusCode::Feasible => {
            extractor::extract(schedule_id.as_ref(), input, &vars, solver, &outcome, &metadata)?
        }
        shiftforge_core::SolveStatusCode::Infeasible | shiftforge_core::SolveStatusCode::Unknown => {
            extractor::extract_unsolved(schedule_id.as_ref(), input, &outcome)
        }
    };

    info!(state = %OrchestratorState::Done, status = ?schedule.status, "scheduling run complete");
    Ok(schedule)
}
