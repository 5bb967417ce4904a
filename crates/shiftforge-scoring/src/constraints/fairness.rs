//! Fairness constraint (§4.5.4): keeps total assigned shifts of the
//! undesirable category per worker within a bounded spread of one another.
//!
//! Parameter: `categories` (optional list of shift categories) — the
//! balanced set `U`. Defaults to every shift type with `is_undesirable`
//! set.

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, Term, VariableBuilder};

use crate::constraints::{Constraint, Contribution};
use crate::shared::scaled_weight;

pub struct FairnessConstraint;

/// The shift type ids making up `U`, the category set fairness balances.
fn category_shift_ids(input: &SchedulingInput, config: &ConstraintConfig) -> Vec<String> {
    match config.parameter_str_list("categories") {
        Some(categories) => input
            .shift_types
            .values()
            .filter(|s| categories.contains(&s.category))
            .map(|s| s.id.clone())
            .collect(),
        None => input
            .shift_types
            .values()
            .filter(|s| s.is_undesirable)
            .map(|s| s.id.clone())
            .collect(),
    }
}

/// `Σ_{s∈U} total[w,s]` for one worker, as a term list rather than a variable.
fn worker_total_terms(
    vars: &VariableBuilder,
    input: &SchedulingInput,
    worker_id: &str,
    category_shift_ids: &[String],
) -> Result<Vec<Term>> {
    category_shift_ids
        .iter()
        .map(|shift_id| vars.total(input, worker_id, shift_id))
        .map(|r| r.map(|v| (v, 1)))
        .collect()
}

impl Constraint for FairnessConstraint {
    fn name(&self) -> &'static str {
        "fairness"
    }

    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>> {
        let active: Vec<_> = input.active_workers().collect();
        if active.len() < 2 {
            tracing::debug!(
                active_workers = active.len(),
                "fairness: fewer than two active workers, nothing to balance"
            );
            return Ok(Vec::new());
        }

        let category_ids = category_shift_ids(input, config);
        if category_ids.is_empty() {
            tracing::debug!("fairness: no shift types in the balanced category, nothing to balance");
            return Ok(Vec::new());
        }

        let bound = (input.num_periods() * category_ids.len()) as i64;
        let max_assigned = solver.new_int(0, bound);
        let min_assigned = solver.new_int(0, bound);

        for worker in &active {
            let totals = worker_total_terms(vars, input, &worker.id, &category_ids)?;

            // max_assigned >= Σ_s total[w,s]
            let mut ge_terms = vec![(max_assigned, 1)];
            ge_terms.extend(totals.iter().map(|&(v, c)| (v, -c)));
            solver.add_linear_ge(&ge_terms, 0);

            // min_assigned <= Σ_s total[w,s]
            let mut le_terms = totals.clone();
            le_terms.push((min_assigned, -1));
            solver.add_linear_ge(&le_terms, 0);
        }

        let spread = solver.new_int(0, bound);
        solver.add_linear_eq(&[(max_assigned, 1), (min_assigned, -1), (spread, -1)], 0);

        if config.is_hard {
            let cap = config.parameter_u64("max_spread").unwrap_or(1) as i64;
            solver.add_linear_le(&[(spread, 1)], cap);
            return Ok(Vec::new());
        }

        Ok(vec![Contribution {
            term: (spread, scaled_weight(config, 1)),
            label: "fairness: spread between busiest and quietest worker".to_string(),
        }])
    }
}
