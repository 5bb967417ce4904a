//! Sequence constraint (§4.5.7): bounds how many consecutive periods a
//! worker may be assigned a shift type from a given category set in a row.
//!
//! Parameters: `max_consecutive` (default 1 — no two periods in a row);
//! `categories` (optional list of shift categories to restrict the check
//! to — default is every shift type with `is_undesirable` set).

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, VariableBuilder};

use crate::constraints::{Constraint, Contribution};
use crate::shared::scaled_weight;

pub struct SequenceConstraint;

fn in_scope(config: &ConstraintConfig, category: &str, is_undesirable: bool) -> bool {
    match config.parameter_str_list("categories") {
        Some(categories) => categories.iter().any(|c| c == category),
        None => is_undesirable,
    }
}

impl Constraint for SequenceConstraint {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>> {
        let max_consecutive = config.parameter_u64("max_consecutive").unwrap_or(1).max(1) as usize;
        let window = max_consecutive + 1;
        if window > input.num_periods() {
            return Ok(Vec::new());
        }

        let mut contributions = Vec::new();
        for (_, shift) in input
            .shift_types
            .iter()
            .filter(|(_, s)| in_scope(config, &s.category, s.is_undesirable))
        {
            for worker in input.active_workers() {
                for start in 0..=(input.num_periods() - window) {
                    let mut terms = Vec::with_capacity(window);
                    for p in start..start + window {
                        terms.push((vars.x(input, &worker.id, p, &shift.id)?, 1));
                    }

                    if config.is_hard {
                        solver.add_linear_le(&terms, max_consecutive as i64);
                        continue;
                    }

                    let excess = solver.new_int(0, window as i64);
                    let mut le_terms = terms;
                    le_terms.push((excess, -1));
                    solver.add_linear_le(&le_terms, max_consecutive as i64);

                    contributions.push(Contribution {
                        term: (excess, scaled_weight(config, 1)),
                        label: format!(
                            "sequence: worker {} exceeds {max_consecutive} consecutive '{}' starting period {start}",
                            worker.id, shift.id
                        ),
                    });
                }
            }
        }
        Ok(contributions)
    }
}
