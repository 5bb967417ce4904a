//! Shiftforge Scoring - the constraint library, objective builder and
//! constraint registry for workforce shift scheduling (§4.5-§4.7).
//!
//! Unlike an incremental score director, shiftforge's constraints compile
//! straight into the backend's linear model: each one either adds hard
//! linear constraints or introduces violation variables whose weighted
//! sum becomes the objective built in [`objective`].

pub mod constraints;
pub mod objective;
pub mod registry;
mod shared;

#[cfg(test)]
mod tests;

pub use constraints::coverage::apply_structural as apply_structural_constraints;
pub use constraints::{Constraint, Contribution};
pub use objective::{build_objective, ObjectiveMetadata};
pub use registry::Registry;
