//! Shiftforge Core - domain model, period calendar and abstract solver
//! interface for workforce shift scheduling
//!
//! This crate provides the backend-agnostic half of shiftforge:
//! - The immutable domain value types (`Worker`, `ShiftType`, `Schedule`, ...)
//! - The period calendar that maps a horizon to an ordered period sequence
//! - The abstract CP-SAT-style solver interface, plus a dependency-free
//!   reference backend that implements it
//! - The variable builder and pre-solve feasibility checker
//! - The error taxonomy shared across the whole workspace

pub mod backend;
pub mod calendar;
pub mod domain;
pub mod error;
pub mod feasibility;
pub mod solver;
pub mod variables;

pub use backend::ReferenceSolver;
pub use calendar::{PeriodCalendar, PeriodType};
pub use domain::{
    Assignment, Availability, AvailabilityType, ConstraintConfig, ConstraintStats,
    PerConstraintStats, PeriodAssignment, Schedule, SchedulingInput, SchedulingRequest,
    ShiftFrequencyRequirement, ShiftType, SolveStatus, SolverParams, Worker, WorkerBuilder,
};
pub use error::{
    ConfigErrorKind, CoreError, FeasibilityIssue, FeasibilityKind, KeyErrorKind, Result, Severity,
    ValidationErrorKind,
};
pub use solver::{Comparator, LinearConstraint, SolveOutcome, SolveStatusCode, Solver, Term, VarId};
pub use variables::VariableBuilder;
