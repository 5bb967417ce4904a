//! Shiftforge Solver - the solver orchestrator, solution extractor and
//! schedule validator (§4.8-§4.10).
//!
//! [`orchestrator::run`] is the single entry point: given any backend
//! implementing [`shiftforge_core::Solver`] plus a [`shiftforge_core::SchedulingInput`],
//! it drives pre-solve feasibility checking, model construction, solving
//! and extraction end to end.

pub mod extractor;
pub mod orchestrator;
pub mod state;
pub mod validator;

#[cfg(test)]
mod tests;

pub use orchestrator::run;
pub use state::OrchestratorState;
pub use validator::{validate, ValidationFinding, ValidationReport};
