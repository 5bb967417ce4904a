#![cfg(test)]

use chrono::{NaiveDate, NaiveTime};
use shiftforge_core::{
    ConstraintConfig, ReferenceSolver, SchedulingInput, ShiftType, SolveStatus, SolverParams, Worker,
};
use shiftforge_core::calendar::PeriodCalendar;

use crate::{run, validate};

fn weekly_two_worker_input() -> SchedulingInput {
    let cal = PeriodCalendar::new(
        NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
        NaiveDate::from_ymd_opt(2026, 4, 12).unwrap(),
        7,
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
fn solves_a_feasible_single_period_model() {
    let input = weekly_two_worker_input();
    let mut solver = ReferenceSolver::new();
    let schedule = run("s1", &mut solver, &input, &SolverParams::default()).unwrap();

    assert_eq!(schedule.status, SolveStatus::Optimal);
    assert!(schedule.status.has_schedule());
    assert!(schedule.validate_referential_integrity());

    let report = validate(&schedule, &input);
    assert!(report.is_valid(), "{report}");

    let total_assignments: usize = schedule.periods.iter().map(|p| p.iter().count()).sum();
    assert_eq!(total_assignments, 7, "one worker covers the day shift every day of the week");
}

#[test]
fn rejects_structurally_infeasible_model_before_solving() {
    let cal = PeriodCalendar::new(
        NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
        NaiveDate::from_ymd_opt(2026, 4, 12).unwrap(),
        7,
    )
    .unwrap();
    let workers = vec![Worker::builder("w1", "Alice").build().unwrap()];
    let shifts = vec![ShiftType::new(
        "day",
        "Day",
        "day",
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        8.0,
        2,
        false,
        None,
        None,
    )
    .unwrap()];
    let input = SchedulingInput::new(workers, shifts, cal);

    let mut solver = ReferenceSolver::new();
    let schedule = run("s2", &mut solver, &input, &SolverParams::default()).unwrap();
    assert_eq!(schedule.status, SolveStatus::PreSolveInfeasible);
    assert!(!schedule.status.has_schedule());
    assert!(schedule.periods.is_empty());
    let stats = schedule.statistics.get("pre_check").expect("pre-check issues recorded");
    assert!(stats.active_violations >= 1);
}

#[test]
fn soft_request_violation_shows_up_in_statistics() {
    let restricted = Worker::builder("w1", "Alice").restricted_shift("day").build().unwrap();
    let mut input = weekly_two_worker_input();
    input.workers.insert("w1".to_string(), restricted);
    let input = input
        .with_constraint_config("request", ConstraintConfig::new(true, false, 5))
        .with_requests(vec![shiftforge_core::SchedulingRequest::new(
            "w1", "day", 0, true, 2,
        )
        .unwrap()]);

    let mut solver = ReferenceSolver::new();
    let schedule = run("s3", &mut solver, &input, &SolverParams::default()).unwrap();
    assert!(schedule.status.has_schedule());

    let stats = schedule.statistics.get("request").expect("request constraint ran");
    assert!(stats.active_violations >= 1);
    assert!(!stats.worst_offenders.is_empty());
}
