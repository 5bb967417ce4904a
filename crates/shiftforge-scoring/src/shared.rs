//! Helpers shared by every constraint implementation.

use shiftforge_core::{ConstraintConfig, Comparator, LinearConstraint, Solver, Term};

/// Weight to attach to one violation unit: `config.weight * multiplier`.
/// `multiplier` is typically a request's priority or 1 for uniform penalties.
#[inline]
pub fn scaled_weight(config: &ConstraintConfig, multiplier: u64) -> i64 {
    (config.weight * multiplier) as i64
}

/// `Σ terms <= rhs` as a standalone [`LinearConstraint`], for use inside a
/// reified implication.
#[inline]
pub fn le(terms: Vec<Term>, rhs: i64) -> LinearConstraint {
    LinearConstraint::new(terms, Comparator::Le, rhs)
}

/// `Σ terms >= rhs` as a standalone [`LinearConstraint`].
#[inline]
pub fn ge(terms: Vec<Term>, rhs: i64) -> LinearConstraint {
    LinearConstraint::new(terms, Comparator::Ge, rhs)
}

/// Negates every coefficient in `terms`, leaving variables untouched.
pub fn negate(terms: &[Term]) -> Vec<Term> {
    terms.iter().map(|&(v, c)| (v, -c)).collect()
}

/// Allocates a fresh boolean violation variable on `solver`.
#[inline]
pub fn new_violation_bool(solver: &mut dyn Solver) -> shiftforge_core::VarId {
    solver.new_bool()
}
