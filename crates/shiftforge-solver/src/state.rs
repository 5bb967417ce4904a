//! The orchestrator's state machine (§4.8).
//!
//! `Init -> PreCheck -> Build -> Solve -> Extract -> Done`. A failure at any
//! stage short-circuits the run and surfaces as `Err` rather than as a
//! distinct state — the caller never observes a `Fail` value, only which
//! stage raised it (via the error variant and the `tracing::error!` emitted
//! at the point of failure).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Init,
    PreCheck,
    Build,
    Solve,
    Extract,
    Done,
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrchestratorState::Init => "init",
            OrchestratorState::PreCheck => "pre_check",
            OrchestratorState::Build => "build",
            OrchestratorState::Solve => "solve",
            OrchestratorState::Extract => "extract",
            OrchestratorState::Done => "done",
        };
        f.write_str(label)
    }
}
