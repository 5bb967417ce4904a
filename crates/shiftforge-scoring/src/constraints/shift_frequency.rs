//! Shift-frequency constraint (§4.5.9): enforces every
//! [`ShiftFrequencyRequirement`](shiftforge_core::ShiftFrequencyRequirement)
//! in the input — within every sliding window of `max_periods_between`
//! periods, the worker must be assigned at least one of the requirement's
//! shift types.

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, Term, VariableBuilder};

use crate::constraints::{Constraint, Contribution};
use crate::shared::scaled_weight;

pub struct ShiftFrequencyConstraint;

impl Constraint for ShiftFrequencyConstraint {
    fn name(&self) -> &'static str {
        "shift_frequency"
    }

    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>> {
        let mut contributions = Vec::new();
        for req in &input.shift_frequency_requirements {
            let window = req.window_size();
            if window > input.num_periods() {
                continue;
            }

            for start in 0..=(input.num_periods() - window) {
                let mut terms: Vec<Term> = Vec::new();
                for p in start..start + window {
                    for shift_id in &req.shift_types {
                        terms.push((vars.x(input, &req.worker_id, p, shift_id)?, 1));
                    }
                }

                if config.is_hard {
                    solver.add_linear_ge(&terms, 1);
                    continue;
                }

                let shortfall = solver.new_bool();
                let mut ge_terms = terms;
                ge_terms.push((shortfall, 1));
                solver.add_linear_ge(&ge_terms, 1);

                contributions.push(Contribution {
                    term: (shortfall, scaled_weight(config, 1)),
                    label: format!(
                        "shift_frequency: worker {} misses {:?} in periods {start}..{}",
                        req.worker_id,
                        req.shift_types,
                        start + window
                    ),
                });
            }
        }
        Ok(contributions)
    }
}
