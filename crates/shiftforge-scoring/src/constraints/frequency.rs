//! Frequency constraint (§4.5.5): a worker must not go too many consecutive
//! periods without any assignment, of any shift type.
//!
//! Parameter: `default_max_periods_between` (default 1) — call it `N`. For
//! every sliding window of `N+1` periods, the worker must have at least one
//! assignment (to any shift type) somewhere in that window. Skipped with a
//! WARN log when `N+1` exceeds the horizon.

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, Term, VariableBuilder};

use crate::constraints::{Constraint, Contribution};
use crate::shared::scaled_weight;

pub struct FrequencyConstraint;

fn worker_period_terms(
    vars: &VariableBuilder,
    input: &SchedulingInput,
    worker_id: &str,
    period: usize,
) -> Result<Vec<Term>> {
    input
        .shift_types
        .keys()
        .map(|shift_id| vars.x(input, worker_id, period, shift_id))
        .map(|r| r.map(|v| (v, 1)))
        .collect()
}

impl Constraint for FrequencyConstraint {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>> {
        let max_periods_between = config.parameter_u64("default_max_periods_between").unwrap_or(1) as usize;
        let window = max_periods_between + 1;

        if window > input.num_periods() {
            tracing::warn!(
                window,
                num_periods = input.num_periods(),
                "frequency: window larger than horizon, skipping"
            );
            return Ok(Vec::new());
        }

        let mut contributions = Vec::new();
        for worker in input.active_workers() {
            for start in 0..=(input.num_periods() - window) {
                let mut terms = Vec::new();
                for p in start..start + window {
                    terms.extend(worker_period_terms(vars, input, &worker.id, p)?);
                }

                if config.is_hard {
                    solver.add_linear_ge(&terms, 1);
                    continue;
                }

                let violation = solver.new_bool();
                let mut ge_terms = terms;
                ge_terms.push((violation, 1));
                solver.add_linear_ge(&ge_terms, 1);

                contributions.push(Contribution {
                    term: (violation, scaled_weight(config, 1)),
                    label: format!(
                        "frequency: worker {} unassigned for periods {start}..{}",
                        worker.id,
                        start + window
                    ),
                });
            }
        }
        Ok(contributions)
    }
}
