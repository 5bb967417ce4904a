//! Feasibility checker (§4.4).
//!
//! Runs entirely over [`SchedulingInput`] before a single variable is
//! allocated. Six checks, each naming the offending worker, shift type, or
//! period so the caller can act on the message without re-deriving it:
//! coverage reachability, per-period availability shortfall, duplicate
//! requests, request/restriction conflicts, shift-frequency solvability, and
//! horizon sanity.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::SchedulingInput;
use crate::error::{FeasibilityIssue, FeasibilityKind};

/// Runs all six checks and collects every issue found. An empty result
/// means the model may still turn out infeasible once solved, but nothing
/// structural rules it out up front.
pub fn check(input: &SchedulingInput) -> Vec<FeasibilityIssue> {
    let mut issues = Vec::new();
    check_horizon_sanity(input, &mut issues);
    check_coverage_reachability(input, &mut issues);
    check_period_availability(input, &mut issues);
    check_duplicate_requests(input, &mut issues);
    check_request_restriction_conflicts(input, &mut issues);
    check_shift_frequency_solvability(input, &mut issues);
    issues
}

/// Eligible (active, not restricted from `shift_id`) workers.
fn eligible_workers<'a>(
    input: &'a SchedulingInput,
    shift_id: &'a str,
) -> impl Iterator<Item = &'a crate::domain::Worker> + 'a {
    input
        .active_workers()
        .filter(move |w| !w.is_restricted_from(shift_id))
}

/// Whether shift `s` is active anywhere inside period `p`.
fn shift_active_in_period(
    input: &SchedulingInput,
    shift: &crate::domain::ShiftType,
    p: usize,
) -> bool {
    input
        .calendar
        .weekdays_in_period(p)
        .into_iter()
        .any(|wd| shift.applies_on(wd))
}

fn check_horizon_sanity(input: &SchedulingInput, issues: &mut Vec<FeasibilityIssue>) {
    if input.num_periods() == 0 {
        issues.push(FeasibilityIssue::fatal(
            FeasibilityKind::BadHorizon,
            "calendar contains no periods",
        ));
    }
    for req in &input.shift_frequency_requirements {
        if req.window_size() > input.num_periods() {
            issues.push(FeasibilityIssue::warning(
                FeasibilityKind::WindowLargerThanHorizon,
                format!(
                    "shift-frequency requirement for worker {} has window {} but the horizon only has {} period(s)",
                    req.worker_id,
                    req.window_size(),
                    input.num_periods()
                ),
            ));
        }
    }
}

/// Structural check (§4.4.1): ignoring availability, are there enough
/// eligible workers in principle to staff every active shift?
fn check_coverage_reachability(input: &SchedulingInput, issues: &mut Vec<FeasibilityIssue>) {
    for (_, shift) in &input.shift_types {
        let eligible_count = eligible_workers(input, &shift.id).count() as u32;
        if eligible_count >= shift.workers_required {
            continue;
        }
        for p in 0..input.num_periods() {
            if !shift_active_in_period(input, shift, p) {
                continue;
            }
            issues.push(FeasibilityIssue::fatal(
                FeasibilityKind::CoverageUnreachable,
                format!(
                    "period {p}: shift '{}' requires {} worker(s) but only {eligible_count} eligible worker(s) exist in the whole roster",
                    shift.id, shift.workers_required
                ),
            ));
        }
    }
}

/// Availability-aware check (§4.4.2): among eligible workers, how many are
/// not marked unavailable for any date in this period?
fn check_period_availability(input: &SchedulingInput, issues: &mut Vec<FeasibilityIssue>) {
    for (_, shift) in &input.shift_types {
        for p in 0..input.num_periods() {
            if !shift_active_in_period(input, shift, p) {
                continue;
            }
            let dates = input.calendar.dates_in_period(p);
            let available_count = eligible_workers(input, &shift.id)
                .filter(|w| {
                    !dates
                        .iter()
                        .any(|&date| input.unavailable_for(&w.id, date, &shift.id))
                })
                .count() as u32;
            if available_count < shift.workers_required {
                issues.push(FeasibilityIssue::fatal(
                    FeasibilityKind::PeriodAvailabilityShortfall,
                    format!(
                        "period {p}: shift '{}' requires {} worker(s) but only {available_count} eligible worker(s) are available",
                        shift.id, shift.workers_required
                    ),
                ));
            }
        }
    }
}

/// Flags requests that repeat the same `(worker, shift, period)` key,
/// which would otherwise add redundant or contradictory literal pins.
fn check_duplicate_requests(input: &SchedulingInput, issues: &mut Vec<FeasibilityIssue>) {
    let mut seen: BTreeMap<(&str, &str, usize), bool> = BTreeMap::new();
    for req in &input.requests {
        let key = (req.worker_id.as_str(), req.shift_type_id.as_str(), req.period_index);
        match seen.get(&key) {
            Some(&prior_positive) if prior_positive != req.is_positive => {
                issues.push(FeasibilityIssue::fatal(
                    FeasibilityKind::DuplicateId,
                    format!(
                        "worker {}, shift '{}', period {}: conflicting requests (both positive and negative)",
                        req.worker_id, req.shift_type_id, req.period_index
                    ),
                ));
            }
            Some(_) => {
                issues.push(FeasibilityIssue::warning(
                    FeasibilityKind::DuplicateId,
                    format!(
                        "worker {}, shift '{}', period {}: duplicate request",
                        req.worker_id, req.shift_type_id, req.period_index
                    ),
                ));
            }
            None => {
                seen.insert(key, req.is_positive);
            }
        }
    }
}

/// §4.4.4: a positive request naming a shift the worker is restricted from
/// can never be satisfied.
fn check_request_restriction_conflicts(input: &SchedulingInput, issues: &mut Vec<FeasibilityIssue>) {
    for req in &input.requests {
        let Some(worker) = input.worker(&req.worker_id) else {
            issues.push(FeasibilityIssue::fatal(
                FeasibilityKind::UnknownWorker,
                format!("request references unknown worker {}", req.worker_id),
            ));
            continue;
        };
        if input.shift_type(&req.shift_type_id).is_none() {
            issues.push(FeasibilityIssue::fatal(
                FeasibilityKind::UnknownShiftType,
                format!("request references unknown shift type {}", req.shift_type_id),
            ));
            continue;
        }
        if req.is_positive && worker.is_restricted_from(&req.shift_type_id) {
            issues.push(FeasibilityIssue::fatal(
                FeasibilityKind::RequestRestrictionConflict,
                format!(
                    "worker {} requested shift '{}' in period {} but is restricted from it",
                    req.worker_id, req.shift_type_id, req.period_index
                ),
            ));
        }
    }
}

/// §4.4.5: every shift-frequency requirement must name a worker who can
/// actually work at least one of its shift types.
fn check_shift_frequency_solvability(input: &SchedulingInput, issues: &mut Vec<FeasibilityIssue>) {
    for req in &input.shift_frequency_requirements {
        let Some(worker) = input.worker(&req.worker_id) else {
            issues.push(FeasibilityIssue::fatal(
                FeasibilityKind::UnknownWorker,
                format!(
                    "shift-frequency requirement references unknown worker {}",
                    req.worker_id
                ),
            ));
            continue;
        };
        for shift_id in &req.shift_types {
            if input.shift_type(shift_id).is_none() {
                issues.push(FeasibilityIssue::fatal(
                    FeasibilityKind::UnknownShiftType,
                    format!(
                        "shift-frequency requirement for worker {} references unknown shift type {shift_id}",
                        req.worker_id
                    ),
                ));
            }
        }
        if req.shift_types.iter().all(|s| worker.is_restricted_from(s)) {
            issues.push(FeasibilityIssue::fatal(
                FeasibilityKind::WorkerRestrictedFromAllShifts,
                format!(
                    "worker {} is restricted from every shift type in its shift-frequency requirement {:?}",
                    req.worker_id, req.shift_types
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::PeriodCalendar;
    use crate::domain::{Availability, AvailabilityType, SchedulingRequest, ShiftType, Worker};
    use chrono::{NaiveDate, NaiveTime};

    fn day_shift(workers_required: u32) -> ShiftType {
        ShiftType::new(
            "day",
            "Day",
            "day",
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            8.0,
            workers_required,
            false,
            None,
            None,
        )
        .unwrap()
    }

    fn weekly_calendar() -> PeriodCalendar {
        PeriodCalendar::new(
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            7,
        )
        .unwrap()
    }

    #[test]
    fn flags_unreachable_coverage() {
        let input = SchedulingInput::new(
            vec![Worker::builder("w1", "A").build().unwrap()],
            vec![day_shift(2)],
            weekly_calendar(),
        );
        let issues = check(&input);
        assert!(issues
            .iter()
            .any(|i| i.kind == FeasibilityKind::CoverageUnreachable));
    }

    #[test]
    fn flags_period_availability_shortfall() {
        let input = SchedulingInput::new(
            vec![Worker::builder("w1", "A").build().unwrap()],
            vec![day_shift(1)],
            weekly_calendar(),
        )
        .with_availabilities(vec![Availability::new(
            "w1",
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            AvailabilityType::Unavailable,
            None,
        )]);
        let issues = check(&input);
        assert!(issues
            .iter()
            .any(|i| i.kind == FeasibilityKind::PeriodAvailabilityShortfall));
    }

    #[test]
    fn flags_request_against_restriction() {
        let worker = Worker::builder("w1", "A").restricted_shift("day").build().unwrap();
        let input = SchedulingInput::new(vec![worker], vec![day_shift(1)], weekly_calendar())
            .with_requests(vec![SchedulingRequest::new("w1", "day", 0, true, 1).unwrap()]);
        let issues = check(&input);
        assert!(issues
            .iter()
            .any(|i| i.kind == FeasibilityKind::RequestRestrictionConflict));
    }

    #[test]
    fn clean_input_has_no_issues() {
        let input = SchedulingInput::new(
            vec![
                Worker::builder("w1", "A").build().unwrap(),
                Worker::builder("w2", "B").build().unwrap(),
            ],
            vec![day_shift(1)],
            weekly_calendar(),
        );
        assert!(check(&input).is_empty());
    }
}
