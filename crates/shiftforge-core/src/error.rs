//! Error taxonomy for the shiftforge core.
//!
//! Validation errors fail fast at construction and never reach the solver.
//! Pre-solve errors short-circuit before the backend is touched. Solver
//! timeouts never raise — they materialize as status codes on
//! [`crate::solver::SolveOutcome`]. The backend's own failures are wrapped
//! in [`CoreError::Backend`].

use thiserror::Error;

/// A single pre-solve diagnostic produced by the feasibility checker (§4.4).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeasibilityIssue {
    pub severity: Severity,
    pub kind: FeasibilityKind,
    pub message: String,
}

impl FeasibilityIssue {
    pub fn fatal(kind: FeasibilityKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(kind: FeasibilityKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Fatal,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FeasibilityKind {
    CoverageUnreachable,
    PeriodAvailabilityShortfall,
    DuplicateId,
    RequestRestrictionConflict,
    UnknownShiftType,
    UnknownWorker,
    WindowLargerThanHorizon,
    WorkerRestrictedFromAllShifts,
    BadHorizon,
}

/// Kinds of [`CoreError::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigErrorKind {
    #[error("horizon is not a positive multiple of the period length")]
    BadHorizon,
    #[error("shift time could not be parsed")]
    InvalidTime,
    #[error("unknown constraint name in configuration")]
    UnknownConstraint,
    #[error("constraint weight must be non-negative")]
    BadWeight,
}

/// Kinds of [`CoreError::Validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("worker restricted_shifts and preferred_shifts overlap")]
    InvalidWorker,
    #[error("shift type has an invalid duration or capacity")]
    InvalidShiftType,
    #[error("scheduling request has a non-positive priority")]
    InvalidRequest,
    #[error("shift-frequency requirement is malformed")]
    InvalidFrequencyReq,
}

/// Kinds of [`CoreError::Key`] lookup failures from the variable builder (§4.3).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyErrorKind {
    #[error("unknown worker id: {0}")]
    UnknownWorker(String),
    #[error("unknown shift-type id: {0}")]
    UnknownShift(String),
    #[error("period index {0} is out of range")]
    BadPeriod(usize),
}

/// The complete error surface of the core (§7).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {kind}: {detail}")]
    Config {
        kind: ConfigErrorKind,
        detail: String,
    },

    #[error("validation error: {kind}: {detail}")]
    Validation {
        kind: ValidationErrorKind,
        detail: String,
    },

    #[error("model is infeasible before solving: {} issue(s)", .issues.len())]
    PreSolveInfeasible { issues: Vec<FeasibilityIssue> },

    #[error("solver backend error: {message}")]
    Backend { message: String },

    #[error("core invariant broken: {description}")]
    InvariantBroken { description: String },

    #[error("key error: {0}")]
    Key(#[from] KeyErrorKind),
}

impl CoreError {
    pub fn config(kind: ConfigErrorKind, detail: impl Into<String>) -> Self {
        Self::Config {
            kind,
            detail: detail.into(),
        }
    }

    pub fn validation(kind: ValidationErrorKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invariant(description: impl Into<String>) -> Self {
        Self::InvariantBroken {
            description: description.into(),
        }
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, CoreError>;
