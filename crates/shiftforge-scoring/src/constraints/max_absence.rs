//! Max-absence constraint (§4.5.8): a worker must not go too many
//! consecutive periods without an assignment of a particular shift type.
//!
//! Parameters: `max_periods_absent` (default 2) — call it `M`; `shift_types`
//! (optional list of shift type ids to restrict the check to — default is
//! every shift type). For every sliding window of `M+1` periods and every
//! selected shift type, the worker must have at least one assignment of
//! that shift type somewhere in the window. Skipped with a WARN log when
//! `M+1` exceeds the horizon, same as frequency (§4.5.5).

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, VariableBuilder};

use crate::constraints::{Constraint, Contribution};
use crate::shared::scaled_weight;

pub struct MaxAbsenceConstraint;

impl Constraint for MaxAbsenceConstraint {
    fn name(&self) -> &'static str {
        "max_absence"
    }

    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>> {
        let max_periods_absent = config.parameter_u64("max_periods_absent").unwrap_or(2) as usize;
        let window = max_periods_absent + 1;
        if window > input.num_periods() {
            tracing::warn!(
                window,
                num_periods = input.num_periods(),
                "max_absence: window larger than horizon, skipping"
            );
            return Ok(Vec::new());
        }

        let shift_ids: Vec<String> = match config.parameter_str_list("shift_types") {
            Some(filtered) => filtered,
            None => input.shift_types.keys().cloned().collect(),
        };

        let mut contributions = Vec::new();
        for worker in input.active_workers() {
            for shift_id in &shift_ids {
                if input.shift_type(shift_id).is_none() {
                    continue;
                }
                for start in 0..=(input.num_periods() - window) {
                    let mut terms = Vec::with_capacity(window);
                    for p in start..start + window {
                        terms.push((vars.x(input, &worker.id, p, shift_id)?, 1));
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
                            "max_absence: worker {} has no '{}' in periods {start}..{}",
                            worker.id,
                            shift_id,
                            start + window
                        ),
                    });
                }
            }
        }
        Ok(contributions)
    }
}
