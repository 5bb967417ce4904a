//! Variable builder (§4.3).
//!
//! Allocates one boolean `x[w,p,s]` per `(worker, period, shift type)` plus
//! one integer `total[w,s]` per `(worker, shift type)`, linked by
//! `total[w,s] = Σ_p x[w,p,s]`. Coverage sums are materialised on demand via
//! [`VariableBuilder::coverage_terms`] rather than allocated as variables.

use crate::domain::SchedulingInput;
use crate::error::{CoreError, KeyErrorKind, Result};
use crate::solver::{Solver, Term, VarId};

/// Typed lookup over the assignment and total variables for one model.
pub struct VariableBuilder {
    num_workers: usize,
    num_periods: usize,
    num_shifts: usize,
    x: Vec<VarId>,
    totals: Vec<VarId>,
}

impl VariableBuilder {
    /// Allocates every `x[w,p,s]` and `total[w,s]` variable on `solver`.
    pub fn build<S: Solver + ?Sized>(solver: &mut S, input: &SchedulingInput) -> Self {
        let num_workers = input.workers.len();
        let num_periods = input.num_periods();
        let num_shifts = input.shift_types.len();

        let mut x = Vec::with_capacity(num_workers * num_periods * num_shifts);
        for _w in 0..num_workers {
            for _p in 0..num_periods {
                for _s in 0..num_shifts {
                    x.push(solver.new_bool());
                }
            }
        }

        let mut totals = Vec::with_capacity(num_workers * num_shifts);
        for w in 0..num_workers {
            for s in 0..num_shifts {
                let total = solver.new_int(0, num_periods as i64);
                let mut terms: Vec<Term> = (0..num_periods)
                    .map(|p| (x[Self::flat_index(num_periods, num_shifts, w, p, s)], 1))
                    .collect();
                terms.push((total, -1));
                solver.add_linear_eq(&terms, 0);
                totals.push(total);
            }
        }

        Self {
            num_workers,
            num_periods,
            num_shifts,
            x,
            totals,
        }
    }

    #[inline]
    fn flat_index(num_periods: usize, num_shifts: usize, w: usize, p: usize, s: usize) -> usize {
        (w * num_periods + p) * num_shifts + s
    }

    fn worker_index(&self, input: &SchedulingInput, worker_id: &str) -> Result<usize> {
        input
            .workers
            .get_index_of(worker_id)
            .filter(|&i| i < self.num_workers)
            .ok_or_else(|| CoreError::Key(KeyErrorKind::UnknownWorker(worker_id.to_string())))
    }

    fn shift_index(&self, input: &SchedulingInput, shift_type_id: &str) -> Result<usize> {
        input
            .shift_types
            .get_index_of(shift_type_id)
            .filter(|&i| i < self.num_shifts)
            .ok_or_else(|| CoreError::Key(KeyErrorKind::UnknownShift(shift_type_id.to_string())))
    }

    fn check_period(&self, period: usize) -> Result<()> {
        if period >= self.num_periods {
            return Err(CoreError::Key(KeyErrorKind::BadPeriod(period)));
        }
        Ok(())
    }

    /// The boolean assignment variable `x[w,p,s]`.
    pub fn x(
        &self,
        input: &SchedulingInput,
        worker_id: &str,
        period: usize,
        shift_type_id: &str,
    ) -> Result<VarId> {
        let w = self.worker_index(input, worker_id)?;
        self.check_period(period)?;
        let s = self.shift_index(input, shift_type_id)?;
        Ok(self.x[Self::flat_index(self.num_periods, self.num_shifts, w, period, s)])
    }

    /// The integer total variable `total[w,s] = Σ_p x[w,p,s]`.
    pub fn total(
        &self,
        input: &SchedulingInput,
        worker_id: &str,
        shift_type_id: &str,
    ) -> Result<VarId> {
        let w = self.worker_index(input, worker_id)?;
        let s = self.shift_index(input, shift_type_id)?;
        Ok(self.totals[w * self.num_shifts + s])
    }

    /// `coverage[p,s] = Σ_w x[w,p,s]`, materialised as a term list rather
    /// than a dedicated variable (§4.3).
    pub fn coverage_terms(
        &self,
        input: &SchedulingInput,
        period: usize,
        shift_type_id: &str,
    ) -> Result<Vec<Term>> {
        self.check_period(period)?;
        let s = self.shift_index(input, shift_type_id)?;
        Ok((0..self.num_workers)
            .map(|w| (self.x[Self::flat_index(self.num_periods, self.num_shifts, w, period, s)], 1))
            .collect())
    }

    /// All `x[w,*,s]` terms for one worker and shift type across the horizon.
    pub fn worker_shift_terms(
        &self,
        input: &SchedulingInput,
        worker_id: &str,
        shift_type_id: &str,
    ) -> Result<Vec<Term>> {
        let w = self.worker_index(input, worker_id)?;
        let s = self.shift_index(input, shift_type_id)?;
        Ok((0..self.num_periods)
            .map(|p| (self.x[Self::flat_index(self.num_periods, self.num_shifts, w, p, s)], 1))
            .collect())
    }

    #[inline]
    pub fn num_periods(&self) -> usize {
        self.num_periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ReferenceSolver;
    use crate::calendar::PeriodCalendar;
    use crate::domain::{SchedulingInput, ShiftType, Worker};
    use chrono::NaiveDate;

    fn sample_input() -> SchedulingInput {
        let cal = PeriodCalendar::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            1,
        )
        .unwrap();
        let workers = vec![Worker::builder("w1", "A").build().unwrap()];
        let shifts = vec![ShiftType::new(
            "day",
            "Day",
            "day",
            chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            8.0,
            1,
            false,
            None,
            None,
        )
        .unwrap()];
        SchedulingInput::new(workers, shifts, cal)
    }

    #[test]
    fn links_total_to_assignment_sum() {
        let input = sample_input();
        let mut solver = ReferenceSolver::new();
        let vars = VariableBuilder::build(&mut solver, &input);
        let x0 = vars.x(&input, "w1", 0, "day").unwrap();
        let x1 = vars.x(&input, "w1", 1, "day").unwrap();
        assert_ne!(x0, x1);
        let total = vars.total(&input, "w1", "day").unwrap();
        assert_ne!(total, x0);
    }

    #[test]
    fn unknown_worker_is_a_key_error() {
        let input = sample_input();
        let mut solver = ReferenceSolver::new();
        let vars = VariableBuilder::build(&mut solver, &input);
        let err = vars.x(&input, "ghost", 0, "day").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Key(KeyErrorKind::UnknownWorker(_))
        ));
    }

    #[test]
    fn bad_period_is_a_key_error() {
        let input = sample_input();
        let mut solver = ReferenceSolver::new();
        let vars = VariableBuilder::build(&mut solver, &input);
        let err = vars.x(&input, "w1", 99, "day").unwrap_err();
        assert!(matches!(err, CoreError::Key(KeyErrorKind::BadPeriod(99))));
    }
}
