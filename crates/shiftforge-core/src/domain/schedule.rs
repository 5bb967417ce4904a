//! Schedule, Assignment and per-constraint statistics (§3, §4.9, §6).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::PeriodType;

/// A single worker-to-shift-type assignment on a concrete date.
///
/// Durations and times are looked up from the `ShiftType` at read time;
/// an assignment never duplicates them (§3 invariant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub worker_id: String,
    pub shift_type_id: String,
    pub date: NaiveDate,
}

/// All assignments for one period, grouped by worker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodAssignment {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub assignments: BTreeMap<String, Vec<Assignment>>,
}

impl PeriodAssignment {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            assignments: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, assignment: Assignment) {
        self.assignments
            .entry(assignment.worker_id.clone())
            .or_default()
            .push(assignment);
    }

    /// All assignments in this period, worker order not significant.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.values().flatten()
    }
}

/// Per-constraint diagnostics computed during extraction (§4.9) or
/// validation (§4.10).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintStats {
    pub constraint_name: String,
    pub active_violations: u64,
    pub weighted_penalty: f64,
    pub worst_offenders: Vec<String>,
}

/// Collected statistics across all constraints, keyed by constraint name.
pub type PerConstraintStats = BTreeMap<String, ConstraintStats>;

/// Solver status codes (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
    PreSolveInfeasible,
}

impl SolveStatus {
    pub fn has_schedule(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// A complete, solved (or re-validated) schedule (§3, §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Schedule {
    pub schedule_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub period_type: PeriodType,
    pub num_periods: usize,
    pub worker_ids: Vec<String>,
    pub shift_type_ids: Vec<String>,
    pub periods: Vec<PeriodAssignment>,
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub solve_time_seconds: f64,
    pub statistics: PerConstraintStats,
}

impl Schedule {
    /// Every assignment references a known worker/shift-type/period (§3 invariant).
    pub fn validate_referential_integrity(&self) -> bool {
        let workers: std::collections::HashSet<_> = self.worker_ids.iter().collect();
        let shifts: std::collections::HashSet<_> = self.shift_type_ids.iter().collect();
        if self.periods.len() != self.num_periods {
            return false;
        }
        self.periods.iter().all(|p| {
            p.iter()
                .all(|a| workers.contains(&a.worker_id) && shifts.contains(&a.shift_type_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schedule {
        let d = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut period = PeriodAssignment::new(d, d);
        period.push(Assignment {
            worker_id: "w1".into(),
            shift_type_id: "day".into(),
            date: d,
        });
        Schedule {
            schedule_id: "s1".into(),
            start_date: d,
            end_date: d,
            period_type: PeriodType::Day,
            num_periods: 1,
            worker_ids: vec!["w1".into()],
            shift_type_ids: vec!["day".into()],
            periods: vec![period],
            status: SolveStatus::Optimal,
            objective_value: Some(0.0),
            solve_time_seconds: 0.01,
            statistics: PerConstraintStats::new(),
        }
    }

    #[test]
    fn round_trips_through_json() {
        let schedule = sample();
        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(schedule, back);
    }

    #[test]
    fn detects_referential_integrity() {
        assert!(sample().validate_referential_integrity());

        let mut bad = sample();
        bad.periods[0].push(Assignment {
            worker_id: "ghost".into(),
            shift_type_id: "day".into(),
            date: bad.start_date,
        });
        assert!(!bad.validate_referential_integrity());
    }
}
