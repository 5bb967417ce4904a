//! Availability constraint (§4.5.3): a worker marked `Unavailable` for any
//! date within a period overlapping that record, for a given shift type,
//! should not be assigned that shift anywhere in that period.

use shiftforge_core::{ConstraintConfig, Result, SchedulingInput, Solver, VariableBuilder};

use crate::constraints::{Constraint, Contribution};
use crate::shared::scaled_weight;

pub struct AvailabilityConstraint;

fn period_overlaps_unavailability(
    input: &SchedulingInput,
    worker_id: &str,
    period: usize,
    shift_type_id: &str,
) -> bool {
    input
        .calendar
        .dates_in_period(period)
        .into_iter()
        .any(|date| input.unavailable_for(worker_id, date, shift_type_id))
}

impl Constraint for AvailabilityConstraint {
    fn name(&self) -> &'static str {
        "availability"
    }

    fn apply(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
        config: &ConstraintConfig,
    ) -> Result<Vec<Contribution>> {
        let mut contributions = Vec::new();
        for worker in input.active_workers() {
            for (_, shift) in &input.shift_types {
                for p in 0..input.num_periods() {
                    if !period_overlaps_unavailability(input, &worker.id, p, &shift.id) {
                        continue;
                    }
                    let x = vars.x(input, &worker.id, p, &shift.id)?;

                    if config.is_hard {
                        solver.add_linear_eq(&[(x, 1)], 0);
                        continue;
                    }

                    let viol = solver.new_bool();
                    // x <= viol: if the worker is assigned despite being
                    // unavailable, the violation fires.
                    solver.add_linear_le(&[(x, 1), (viol, -1)], 0);
                    contributions.push(Contribution {
                        term: (viol, scaled_weight(config, 1)),
                        label: format!(
                            "availability: worker {} unavailable for '{}' in period {p}",
                            worker.id, shift.id
                        ),
                    });
                }
            }
        }
        Ok(contributions)
    }
}
