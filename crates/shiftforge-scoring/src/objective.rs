//! Objective builder (§4.6): combines every enabled soft constraint's
//! violation terms into the single weighted-sum objective the backend
//! minimizes, and keeps the per-constraint breakdown around for the
//! solution extractor (§4.9) to read back after solving.

use shiftforge_core::{Solver, Term};

use crate::constraints::Contribution;

/// Per-constraint contributions surviving into the objective, preserved so
/// the extractor can report which violations fired without re-deriving
/// them from the raw model.
pub struct ObjectiveMetadata {
    pub per_constraint: Vec<(&'static str, Vec<Contribution>)>,
}

impl ObjectiveMetadata {
    pub fn is_empty(&self) -> bool {
        self.per_constraint.iter().all(|(_, cs)| cs.is_empty())
    }
}

/// Installs `Σ weight * violation` as the model's objective. Always calls
/// `solver.minimize`, even with an empty term list — an empty constraint
/// set minimizes the constant 0 rather than skipping the call.
pub fn build_objective(
    solver: &mut dyn Solver,
    per_constraint: Vec<(&'static str, Vec<Contribution>)>,
) -> ObjectiveMetadata {
    let terms: Vec<Term> = per_constraint
        .iter()
        .flat_map(|(_, contributions)| contributions.iter().map(|c| c.term))
        .collect();
    solver.minimize(&terms);
    ObjectiveMetadata { per_constraint }
}
