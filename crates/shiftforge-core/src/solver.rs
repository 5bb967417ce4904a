//! The abstract solver interface (§4.2).
//!
//! This is the only surface the core depends on. Any CP-SAT-compatible
//! backend — boolean variables, bounded integers, linear
//! equalities/inequalities, reified implications, and a linear minimization
//! objective — qualifies. `backend::reference::ReferenceSolver` is the
//! backend shipped with this crate; production hosts may wire in a real
//! CP-SAT library behind the same trait.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::SolverParams;
use crate::error::Result;

/// A handle to a variable allocated in the model. Opaque outside the
/// backend; stable for the lifetime of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub u32);

/// One term of a linear expression: `coefficient * variable`.
pub type Term = (VarId, i64);

/// A linear constraint: `Σ terms ⋈ rhs` for `⋈ ∈ {=, ≤, ≥}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub terms: Vec<Term>,
    pub op: Comparator,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn new(terms: Vec<Term>, op: Comparator, rhs: i64) -> Self {
        Self { terms, op, rhs }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Le,
    Ge,
}

/// Result of a call to [`Solver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatusCode {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

/// Outcome of one `solve()` call (§4.2).
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatusCode,
    pub objective_value: Option<i64>,
    pub wall_time: Duration,
}

/// The CP-SAT-style backend contract the core depends on (§4.2).
///
/// A single instance owns one model and one solve; it is not thread-safe
/// and must not be shared across threads (§5).
pub trait Solver {
    /// Allocates a new boolean variable, domain `{0,1}`.
    fn new_bool(&mut self) -> VarId;

    /// Allocates a new bounded integer variable, domain `[lo, hi]`.
    fn new_int(&mut self, lo: i64, hi: i64) -> VarId;

    fn add_linear_eq(&mut self, terms: &[Term], rhs: i64);
    fn add_linear_le(&mut self, terms: &[Term], rhs: i64);
    fn add_linear_ge(&mut self, terms: &[Term], rhs: i64);

    /// `literal == 1 ⟹ constraint holds`. `literal` must be a boolean variable.
    fn add_implication(&mut self, literal: VarId, constraint: LinearConstraint);

    /// Replaces the objective with `Σ terms`, to be minimized.
    fn minimize(&mut self, terms: &[Term]);

    /// Runs the backend. `params` carries the overall time limit, the
    /// quick-solve time limit, and the worker-thread count (§4.2, §5).
    fn solve(&mut self, params: &SolverParams) -> Result<SolveOutcome>;

    /// Reads back the value of `var` in a solved model. Only meaningful
    /// after `solve()` returned `Optimal` or `Feasible`.
    fn value_of(&self, var: VarId) -> i64;
}
