#![cfg(test)]

use chrono::{NaiveDate, NaiveTime};
use shiftforge_core::{
    ConstraintConfig, ReferenceSolver, SchedulingInput, ShiftType, SolveStatusCode, Solver,
    SolverParams, VariableBuilder, Worker,
};

use crate::{apply_structural_constraints, build_objective, Registry};
use shiftforge_core::calendar::PeriodCalendar;

fn two_worker_one_day() -> SchedulingInput {
    let cal = PeriodCalendar::new(
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        1,
    )
    .unwrap();
    let workers = vec![
        Worker::builder("w1", "Alice").build().unwrap(),
        Worker::builder("w2", "Bob").build().unwrap(),
    ];
    let shifts = vec![ShiftType::new(
        "day",
        "Day",
        "day",
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        8.0,
        1,
        false,
        None,
        None,
    )
    .unwrap()];
    SchedulingInput::new(workers, shifts, cal)
}

#[test]
fn coverage_is_structural_and_always_forces_exactly_one_assignment() {
    let input = two_worker_one_day();
    let mut solver = ReferenceSolver::new();
    let vars = VariableBuilder::build(&mut solver, &input);
    apply_structural_constraints(&mut solver, &vars, &input).unwrap();
    let registry = Registry::standard();
    let per_constraint = registry.apply_all(&mut solver, &vars, &input).unwrap();
    build_objective(&mut solver, per_constraint);

    let outcome = solver.solve(&SolverParams::default()).unwrap();
    assert_eq!(outcome.status, SolveStatusCode::Optimal);

    let x1 = vars.x(&input, "w1", 0, "day").unwrap();
    let x2 = vars.x(&input, "w2", 0, "day").unwrap();
    assert_eq!(solver.value_of(x1) + solver.value_of(x2), 1);
}

#[test]
fn worker_restriction_is_always_enforced() {
    let mut input = two_worker_one_day();
    let restricted = Worker::builder("w1", "Alice").restricted_shift("day").build().unwrap();
    input.workers.insert("w1".to_string(), restricted);

    let mut solver = ReferenceSolver::new();
    let vars = VariableBuilder::build(&mut solver, &input);
    apply_structural_constraints(&mut solver, &vars, &input).unwrap();
    let registry = Registry::standard();
    let per_constraint = registry.apply_all(&mut solver, &vars, &input).unwrap();
    build_objective(&mut solver, per_constraint);

    let outcome = solver.solve(&SolverParams::default()).unwrap();
    assert_eq!(outcome.status, SolveStatusCode::Optimal);
    let x1 = vars.x(&input, "w1", 0, "day").unwrap();
    let x2 = vars.x(&input, "w2", 0, "day").unwrap();
    assert_eq!(solver.value_of(x1), 0);
    assert_eq!(solver.value_of(x2), 1);
}

#[test]
fn unknown_constraint_name_is_a_config_error() {
    let input = two_worker_one_day()
        .with_constraint_config("not_a_real_constraint", ConstraintConfig::new(true, true, 0));
    let mut solver = ReferenceSolver::new();
    let vars = VariableBuilder::build(&mut solver, &input);
    let registry = Registry::standard();
    assert!(registry.apply_all(&mut solver, &vars, &input).is_err());
}

#[test]
fn coverage_can_no_longer_be_named_in_constraint_configs() {
    let input = two_worker_one_day()
        .with_constraint_config("coverage", ConstraintConfig::new(false, true, 0));
    let mut solver = ReferenceSolver::new();
    let vars = VariableBuilder::build(&mut solver, &input);
    let registry = Registry::standard();
    assert!(registry.apply_all(&mut solver, &vars, &input).is_err());
}

#[test]
fn soft_request_is_violated_under_conflicting_restriction() {
    let mut input = two_worker_one_day();
    let restricted = Worker::builder("w1", "Alice").restricted_shift("day").build().unwrap();
    input.workers.insert("w1".to_string(), restricted);
    let input = input
        .with_constraint_config("request", ConstraintConfig::new(true, false, 10))
        .with_requests(vec![shiftforge_core::SchedulingRequest::new(
            "w1", "day", 0, true, 1,
        )
        .unwrap()]);

    let mut solver = ReferenceSolver::new();
    let vars = VariableBuilder::build(&mut solver, &input);
    apply_structural_constraints(&mut solver, &vars, &input).unwrap();
    let registry = Registry::standard();
    let per_constraint = registry.apply_all(&mut solver, &vars, &input).unwrap();
    let metadata = build_objective(&mut solver, per_constraint);
    assert!(!metadata.is_empty());

    let outcome = solver.solve(&SolverParams::default()).unwrap();
    assert!(outcome.status.eq(&SolveStatusCode::Optimal) || outcome.status.eq(&SolveStatusCode::Feasible));
    // w1 is structurally forbidden from "day", so its positive request must
    // show up as a violation rather than block the model entirely.
    let request_contributions = &metadata.per_constraint[0];
    assert_eq!(request_contributions.0, "request");
}
