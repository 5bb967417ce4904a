//! Schedule validator (§4.10).
//!
//! An independent re-check of an already-extracted [`Schedule`] against the
//! input it was built from — referential integrity, coverage bounds, the
//! worker-restriction invariant, availability, and shift-frequency windows —
//! without re-running the solver. Useful for validating a schedule that was
//! persisted and reloaded (§6's JSON round-trip) as well as right after
//! extraction.

use std::collections::{HashMap, HashSet};
use std::fmt;

use shiftforge_core::{ConstraintStats, PerConstraintStats, Schedule, SchedulingInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFinding {
    DanglingReference { worker_id: String, shift_type_id: String },
    CoverageBelowMinimum { period: usize, shift_type_id: String, assigned: u32, required: u32 },
    CoverageAboveMaximum { period: usize, shift_type_id: String, assigned: u32, max: u32 },
    RestrictionViolated { worker_id: String, shift_type_id: String },
    UnavailableAssignment { worker_id: String, shift_type_id: String, date: chrono::NaiveDate },
    ShiftFrequencyShortfall { worker_id: String, window_start: usize, window_end: usize },
}

impl ValidationFinding {
    /// The constraint name this finding rolls up under in
    /// [`ValidationReport::statistics`].
    fn constraint_name(&self) -> &'static str {
        match self {
            ValidationFinding::DanglingReference { .. } => "referential_integrity",
            ValidationFinding::CoverageBelowMinimum { .. } | ValidationFinding::CoverageAboveMaximum { .. } => {
                "coverage"
            }
            ValidationFinding::RestrictionViolated { .. } => "worker_restriction",
            ValidationFinding::UnavailableAssignment { .. } => "availability",
            ValidationFinding::ShiftFrequencyShortfall { .. } => "shift_frequency",
        }
    }

    fn offender(&self) -> String {
        match self {
            ValidationFinding::DanglingReference { worker_id, .. } => worker_id.clone(),
            ValidationFinding::CoverageBelowMinimum { shift_type_id, .. }
            | ValidationFinding::CoverageAboveMaximum { shift_type_id, .. } => shift_type_id.clone(),
            ValidationFinding::RestrictionViolated { worker_id, .. } => worker_id.clone(),
            ValidationFinding::UnavailableAssignment { worker_id, .. } => worker_id.clone(),
            ValidationFinding::ShiftFrequencyShortfall { worker_id, .. } => worker_id.clone(),
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFinding::DanglingReference { worker_id, shift_type_id } => write!(
                f,
                "assignment references worker '{worker_id}' or shift '{shift_type_id}' not present in the input"
            ),
            ValidationFinding::CoverageBelowMinimum { period, shift_type_id, assigned, required } => {
                write!(f, "period {period}: shift '{shift_type_id}' has {assigned}/{required} required worker(s)")
            }
            ValidationFinding::CoverageAboveMaximum { period, shift_type_id, assigned, max } => {
                write!(f, "period {period}: shift '{shift_type_id}' has {assigned} worker(s), exceeding the cap of {max}")
            }
            ValidationFinding::RestrictionViolated { worker_id, shift_type_id } => write!(
                f,
                "worker '{worker_id}' is assigned to '{shift_type_id}' despite being restricted from it"
            ),
            ValidationFinding::UnavailableAssignment { worker_id, shift_type_id, date } => write!(
                f,
                "worker '{worker_id}' is assigned '{shift_type_id}' on {date} despite being unavailable"
            ),
            ValidationFinding::ShiftFrequencyShortfall { worker_id, window_start, window_end } => write!(
                f,
                "worker '{worker_id}' has no required shift in periods {window_start}..{window_end}"
            ),
        }
    }
}

/// The outcome of validating one schedule (§4.10): `violations` are hard
/// invariant breaks that make the schedule wrong, `warnings` are findings
/// worth surfacing without invalidating it, and `statistics` rolls both up
/// per constraint. An empty `violations` list means the schedule is
/// internally consistent with its input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
    pub statistics: PerConstraintStats,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The entities named in the most findings (violations and warnings
    /// combined), most-named first. Useful for surfacing "what to fix
    /// first" without re-deriving it from the full finding list.
    pub fn worst_offenders(&self, limit: usize) -> Vec<String> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for finding in self.violations.iter().chain(&self.warnings) {
            *counts.entry(finding.offender()).or_insert(0) += 1;
        }
        let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.into_iter().take(limit).map(|(k, _)| k).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() && self.warnings.is_empty() {
            return write!(f, "schedule is valid");
        }
        writeln!(f, "{} violation(s), {} warning(s):", self.violations.len(), self.warnings.len())?;
        for finding in &self.violations {
            writeln!(f, "  - {finding}")?;
        }
        for finding in &self.warnings {
            writeln!(f, "  - (warning) {finding}")?;
        }
        Ok(())
    }
}

fn tally(findings: &[ValidationFinding]) -> PerConstraintStats {
    let mut stats: PerConstraintStats = PerConstraintStats::new();
    for finding in findings {
        let entry = stats
            .entry(finding.constraint_name().to_string())
            .or_insert_with(|| ConstraintStats {
                constraint_name: finding.constraint_name().to_string(),
                ..Default::default()
            });
        entry.active_violations += 1;
    }
    stats
}

pub fn validate(schedule: &Schedule, input: &SchedulingInput) -> ValidationReport {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    for period in &schedule.periods {
        for assignment in period.iter() {
            let worker = input.worker(&assignment.worker_id);
            let shift = input.shift_type(&assignment.shift_type_id);
            if worker.is_none() || shift.is_none() {
                violations.push(ValidationFinding::DanglingReference {
                    worker_id: assignment.worker_id.clone(),
                    shift_type_id: assignment.shift_type_id.clone(),
                });
                continue;
            }
            let worker = worker.unwrap();

            if worker.is_restricted_from(&assignment.shift_type_id) {
                violations.push(ValidationFinding::RestrictionViolated {
                    worker_id: assignment.worker_id.clone(),
                    shift_type_id: assignment.shift_type_id.clone(),
                });
            }

            if input.unavailable_for(&assignment.worker_id, assignment.date, &assignment.shift_type_id) {
                violations.push(ValidationFinding::UnavailableAssignment {
                    worker_id: assignment.worker_id.clone(),
                    shift_type_id: assignment.shift_type_id.clone(),
                    date: assignment.date,
                });
            }
        }
    }

    if !schedule.status.has_schedule() {
        let statistics = tally(&violations);
        return ValidationReport { violations, warnings, statistics };
    }

    for (p, period) in schedule.periods.iter().enumerate() {
        for (_, shift) in &input.shift_types {
            if !input
                .calendar
                .weekdays_in_period(p)
                .into_iter()
                .any(|wd| shift.applies_on(wd))
            {
                continue;
            }
            let assigned_workers: HashSet<&str> = period
                .iter()
                .filter(|a| a.shift_type_id == shift.id)
                .map(|a| a.worker_id.as_str())
                .collect();
            let assigned = assigned_workers.len() as u32;
            if assigned < shift.workers_required {
                violations.push(ValidationFinding::CoverageBelowMinimum {
                    period: p,
                    shift_type_id: shift.id.clone(),
                    assigned,
                    required: shift.workers_required,
                });
            } else if assigned > shift.max_workers {
                violations.push(ValidationFinding::CoverageAboveMaximum {
                    period: p,
                    shift_type_id: shift.id.clone(),
                    assigned,
                    max: shift.max_workers,
                });
            }
        }
    }

    for req in &input.shift_frequency_requirements {
        let window = req.window_size();
        if window > input.num_periods() {
            warnings.push(ValidationFinding::ShiftFrequencyShortfall {
                worker_id: req.worker_id.clone(),
                window_start: 0,
                window_end: window,
            });
            continue;
        }
        for start in 0..=(input.num_periods() - window) {
            let satisfied = (start..start + window).any(|p| {
                schedule.periods[p]
                    .assignments
                    .get(&req.worker_id)
                    .map(|assignments| assignments.iter().any(|a| req.shift_types.contains(&a.shift_type_id)))
                    .unwrap_or(false)
            });
            if !satisfied {
                violations.push(ValidationFinding::ShiftFrequencyShortfall {
                    worker_id: req.worker_id.clone(),
                    window_start: start,
                    window_end: start + window,
                });
            }
        }
    }

    let mut statistics = tally(&violations);
    for (name, stat) in tally(&warnings) {
        statistics.entry(name).or_insert(stat);
    }

    ValidationReport { violations, warnings, statistics }
}
