//! The constraint library (§4.5): one module per pluggable constraint.
//!
//! Every constraint reads the same three inputs — the scheduling input, the
//! variable builder, and its own [`ConstraintConfig`] — and emits either
//! hard linear constraints directly on the solver, or a violation variable
//! plus a weighted term for the objective (§4.6). Coverage (§4.5.1) and
//! worker-restriction (§4.5.2) are the two structural constraints: always
//! enforced, never configurable, applied directly by
//! [`crate::apply_structural_constraints`] rather than through the
//! registry.

pub mod availability;
pub mod coverage;
pub mod fairness;
pub mod frequency;
pub mod max_absence;
pub mod request;
pub mod sequence;
pub mod shift_frequency;

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, Term, VariableBuilder};

/// One constraint's contribution to the objective: a violation variable,
/// the weight it should carry, and a human label identifying what it's
/// about (used for `worst_offenders` reporting, §4.9).
#[derive(Debug, Clone)]
pub struct Contribution {
    pub term: Term,
    pub label: String,
}

/// A pluggable, registry-driven constraint (§4.5, §4.7).
pub trait Constraint: Send + Sync {
    /// Stable, registry key. Never parsed for semantics (§9).
    fn name(&self) -> &'static str;

    /// Adds this constraint's model contribution. When `config.is_hard` is
    /// true the implementation should add hard constraints and return no
    /// contributions; when false it should introduce violation variables
    /// and return one contribution per violation term.
    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>>;
}

pub use availability::AvailabilityConstraint;
pub use fairness::FairnessConstraint;
pub use frequency::FrequencyConstraint;
pub use max_absence::MaxAbsenceConstraint;
pub use request::RequestConstraint;
pub use sequence::SequenceConstraint;
pub use shift_frequency::ShiftFrequencyConstraint;
