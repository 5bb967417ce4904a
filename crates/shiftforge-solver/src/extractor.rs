//! Solution extractor (§4.9).
//!
//! Reads variable values back from a solved backend and turns them into a
//! [`Schedule`]: one [`Assignment`] per `(worker, date, shift type)` where
//! `x[w,p,s] == 1` and the shift actually runs on that date, plus
//! per-constraint statistics derived from the objective's violation
//! contributions.

use chrono::Datelike;

use shiftforge_core::{
    Assignment, ConstraintStats, PerConstraintStats, PeriodAssignment, Schedule, SchedulingInput,
    SolveOutcome, SolveStatus, SolveStatusCode, Solver, VariableBuilder,
};
use shiftforge_scoring::ObjectiveMetadata;

fn map_status(code: SolveStatusCode) -> SolveStatus {
    match code {
        SolveStatusCode::Optimal => SolveStatus::Optimal,
        SolveStatusCode::Feasible => SolveStatus::Feasible,
        SolveStatusCode::Infeasible => SolveStatus::Infeasible,
        SolveStatusCode::Unknown => SolveStatus::Unknown,
    }
}

/// Builds the [`PerConstraintStats`] map from the objective's contributions,
/// reading each violation variable's value back from the solved model.
fn collect_statistics(solver: &dyn Solver, metadata: &ObjectiveMetadata) -> PerConstraintStats {
    let mut stats = PerConstraintStats::new();
    for (name, contributions) in &metadata.per_constraint {
        let mut active_violations = 0u64;
        let mut weighted_penalty = 0.0f64;
        let mut offenders: Vec<(i64, String)> = Vec::new();

        for contribution in contributions {
            let (var, weight) = contribution.term;
            let value = solver.value_of(var);
            if value <= 0 {
                continue;
            }
            active_violations += 1;
            weighted_penalty += (weight * value) as f64;
            offenders.push((value * weight, contribution.label.clone()));
        }

        offenders.sort_by(|a, b| b.0.cmp(&a.0));
        let worst_offenders = offenders.into_iter().take(3).map(|(_, label)| label).collect();

        stats.insert(
            name.to_string(),
            ConstraintStats {
                constraint_name: name.to_string(),
                active_violations,
                weighted_penalty,
                worst_offenders,
            },
        );
    }
    stats
}

/// Builds the full [`Schedule`] for a solved (`Optimal` or `Feasible`)
/// backend. Callers must not invoke this for `Infeasible`/`Unknown`
/// outcomes — there is nothing meaningful to read back.
pub fn extract(
    schedule_id: impl Into<String>,
    input: &SchedulingInput,
    vars: &VariableBuilder,
    solver: &dyn Solver,
    outcome: &SolveOutcome,
    metadata: &ObjectiveMetadata,
) -> shiftforge_core::Result<Schedule> {
    let mut periods = Vec::with_capacity(input.num_periods());
    for p in 0..input.num_periods() {
        let (start, end) = input
            .calendar
            .period_bounds(p)
            .ok_or_else(|| shiftforge_core::CoreError::invariant("period index out of calendar bounds"))?;
        let mut period = PeriodAssignment::new(start, end);
        let dates = input.calendar.dates_in_period(p);

        for worker in input.workers.values() {
            for (_, shift) in &input.shift_types {
                let x = vars.x(input, &worker.id, p, &shift.id)?;
                if solver.value_of(x) != 1 {
                    continue;
                }
                for &date in &dates {
                    if shift.applies_on(date.weekday()) {
                        period.push(Assignment {
                            worker_id: worker.id.clone(),
                            shift_type_id: shift.id.clone(),
                            date,
                        });
                    }
                }
            }
        }
        periods.push(period);
    }

    Ok(Schedule {
        schedule_id: schedule_id.into(),
        start_date: input.calendar.start_date(),
        end_date: input.calendar.end_date(),
        period_type: input.calendar.period_type(),
        num_periods: input.num_periods(),
        worker_ids: input.workers.keys().cloned().collect(),
        shift_type_ids: input.shift_types.keys().cloned().collect(),
        periods,
        status: map_status(outcome.status),
        objective_value: outcome.objective_value.map(|v| v as f64),
        solve_time_seconds: outcome.wall_time.as_secs_f64(),
        statistics: collect_statistics(solver, metadata),
    })
}

/// Builds a degenerate [`Schedule`] for `Infeasible`/`Unknown` outcomes:
/// no periods, no statistics, status carried through verbatim.
pub fn extract_unsolved(
    schedule_id: impl Into<String>,
    input: &SchedulingInput,
    outcome: &SolveOutcome,
) -> Schedule {
    Schedule {
        schedule_id: schedule_id.into(),
        start_date: input.calendar.start_date(),
        end_date: input.calendar.end_date(),
        period_type: input.calendar.period_type(),
        num_periods: input.num_periods(),
        worker_ids: input.workers.keys().cloned().collect(),
        shift_type_ids: input.shift_types.keys().cloned().collect(),
        periods: Vec::new(),
        status: map_status(outcome.status),
        objective_value: None,
        solve_time_seconds: outcome.wall_time.as_secs_f64(),
        statistics: PerConstraintStats::new(),
    }
}

/// Builds a degenerate [`Schedule`] for a `PreCheck` that found a Fatal
/// [`FeasibilityIssue`](shiftforge_core::FeasibilityIssue): no periods, no
/// solve time, `status = PreSolveInfeasible`. The issues themselves are
/// folded into a single `pre_check` statistics entry so a caller inspecting
/// only the `Schedule` still sees what failed and how many issues fired.
pub fn extract_presolve_infeasible(
    schedule_id: impl Into<String>,
    input: &SchedulingInput,
    issues: &[shiftforge_core::FeasibilityIssue],
) -> Schedule {
    let mut statistics = PerConstraintStats::new();
    statistics.insert(
        "pre_check".to_string(),
        ConstraintStats {
            constraint_name: "pre_check".to_string(),
            active_violations: issues.len() as u64,
            weighted_penalty: 0.0,
            worst_offenders: issues.iter().take(3).map(|issue| issue.message.clone()).collect(),
        },
    );
    Schedule {
        schedule_id: schedule_id.into(),
        start_date: input.calendar.start_date(),
        end_date: input.calendar.end_date(),
        period_type: input.calendar.period_type(),
        num_periods: input.num_periods(),
        worker_ids: input.workers.keys().cloned().collect(),
        shift_type_ids: input.shift_types.keys().cloned().collect(),
        periods: Vec::new(),
        status: SolveStatus::PreSolveInfeasible,
        objective_value: None,
        solve_time_seconds: 0.0,
        statistics,
    }
}
