//! Shiftforge - a constraint-based workforce shift scheduler
//!
//! Shiftforge compiles a workforce shift-scheduling problem (workers, shift
//! types, availability, requests) into a CP-style model of boolean and
//! bounded-integer variables and linear constraints, solves it, and extracts
//! a [`Schedule`] back out. It is built from four crates:
//!
//! - `shiftforge-core` - the domain model, period calendar and the abstract
//!   [`Solver`] interface any backend implements.
//! - `shiftforge-scoring` - the pluggable constraint library, objective
//!   builder and constraint registry.
//! - `shiftforge-solver` - the solver orchestrator, solution extractor and
//!   schedule validator.
//! - `shiftforge-console` (optional, `console` feature) - colored `tracing`
//!   output for scheduling runs.
//!
//! # Quick start
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use shiftforge::prelude::*;
//!
//! let calendar = PeriodCalendar::new(
//!     NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 4, 12).unwrap(),
//!     7,
//! ).unwrap();
//! let workers = vec![Worker::builder("w1", "Alice").build().unwrap()];
//! let shifts = vec![ShiftType::new(
//!     "day", "Day", "day", NaiveTime::from_hms_opt(8, 0, 0).unwrap(), 8.0, 1, false, None, None,
//! ).unwrap()];
//! let input = SchedulingInput::new(workers, shifts, calendar);
//!
//! let mut solver = ReferenceSolver::new();
//! let (schedule, report) = shiftforge::solve("s1", &mut solver, &input, &SolverParams::default()).unwrap();
//! assert!(schedule.status.has_schedule());
//! assert!(report.is_valid());
//! ```

mod solver;

pub use solver::solve;

// =============================================================================
// Core domain model and abstract solver interface
// =============================================================================

pub use shiftforge_core::{
    Assignment, Availability, AvailabilityType, Comparator, ConstraintConfig, ConstraintStats,
    CoreError, FeasibilityIssue, FeasibilityKind, LinearConstraint, PerConstraintStats,
    PeriodAssignment, PeriodCalendar, PeriodType, ReferenceSolver, Result, Schedule,
    SchedulingInput, SchedulingRequest, Severity, ShiftFrequencyRequirement, ShiftType,
    SolveOutcome, SolveStatus, SolveStatusCode, Solver, SolverParams, Term, VarId, Worker,
    WorkerBuilder,
};

// =============================================================================
// Constraint library and objective
// =============================================================================

pub use shiftforge_scoring::{build_objective, Constraint, Contribution, ObjectiveMetadata, Registry};

// =============================================================================
// Orchestrator, extraction and validation
// =============================================================================

pub use shiftforge_solver::{run, validate, OrchestratorState, ValidationFinding, ValidationReport};

// =============================================================================
// Console output (optional)
// =============================================================================

#[cfg(feature = "console")]
pub use shiftforge_console as console;

// =============================================================================
// Prelude
// =============================================================================

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::{
        solve, validate, Assignment, Availability, AvailabilityType, ConstraintConfig, CoreError,
        PeriodAssignment, PeriodCalendar, ReferenceSolver, Schedule, SchedulingInput,
        SchedulingRequest, ShiftFrequencyRequirement, ShiftType, SolveStatus, Solver, SolverParams,
        ValidationReport, Worker,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn solves_and_validates_a_minimal_schedule() {
        let calendar = PeriodCalendar::new(
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
            1,
            false,
            None,
            None,
        )
        .unwrap()];
        let input = SchedulingInput::new(workers, shifts, calendar);

        let mut solver = ReferenceSolver::new();
        let (schedule, report) = solve("s1", &mut solver, &input, &SolverParams::default()).unwrap();

        assert!(schedule.status.has_schedule());
        assert!(report.is_valid());
    }
}
