//! Request constraint (§4.5.6): honors each worker's `SchedulingRequest`,
//! weighted by the request's own priority (§9's priority-semantics
//! resolution: integers >= 1, never 0).

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, VariableBuilder};

use crate::constraints::{Constraint, Contribution};
use crate::shared::scaled_weight;

pub struct RequestConstraint;

impl Constraint for RequestConstraint {
    fn name(&self) -> &'static str {
        "request"
    }

    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>> {
        let mut contributions = Vec::new();
        for req in &input.requests {
            let x = vars.x(input, &req.worker_id, req.period_index, &req.shift_type_id)?;

            if config.is_hard {
                solver.add_linear_eq(&[(x, 1)], if req.is_positive { 1 } else { 0 });
                continue;
            }

            let viol = solver.new_bool();
            if req.is_positive {
                // x + viol >= 1: violated unless the worker is assigned.
                solver.add_linear_ge(&[(x, 1), (viol, 1)], 1);
            } else {
                // x <= viol: violated if the worker is assigned anyway.
                solver.add_linear_le(&[(x, 1), (viol, -1)], 0);
            }

            contributions.push(Contribution {
                term: (viol, scaled_weight(config, req.priority as u64)),
                label: format!(
                    "request: worker {} {} '{}' in period {}",
                    req.worker_id,
                    if req.is_positive { "wants" } else { "avoids" },
                    req.shift_type_id,
                    req.period_index
                ),
            });
        }
        Ok(contributions)
    }
}
