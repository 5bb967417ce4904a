//! A deterministic, dependency-free reference implementation of the
//! abstract solver interface (§4.2).
//!
//! This is a small branch-and-bound CP solver with interval (bounds)
//! propagation on linear constraints — enough to satisfy every §8 testable
//! property and scenario. It is single-threaded; `num_search_workers` is
//! accepted for interface completeness but unused (§5 allows, but does not
//! require, a backend to parallelize). Production hosts that need
//! industrial-scale performance wire in a real CP-SAT library behind the
//! same [`Solver`] trait instead.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::domain::SolverParams;
use crate::error::{CoreError, Result};
use crate::solver::{Comparator, LinearConstraint, SolveOutcome, SolveStatusCode, Solver, Term, VarId};

#[derive(Debug, Clone, Copy)]
struct VarDef {
    lo: i64,
    hi: i64,
}

/// The reference backend. One instance = one model = one solve.
pub struct ReferenceSolver {
    vars: Vec<VarDef>,
    constraints: Vec<LinearConstraint>,
    implications: Vec<(VarId, LinearConstraint)>,
    objective: Vec<Term>,
    values: Vec<i64>,
    solved: bool,
}

impl Default for ReferenceSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceSolver {
    pub fn new() -> Self {
        Self {
            vars: Vec::new(),
            constraints: Vec::new(),
            implications: Vec::new(),
            objective: Vec::new(),
            values: Vec::new(),
            solved: false,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    fn domains(&self) -> Vec<(i64, i64)> {
        self.vars.iter().map(|v| (v.lo, v.hi)).collect()
    }
}

impl Solver for ReferenceSolver {
    fn new_bool(&mut self) -> VarId {
        let id = VarId(self.vars.len() as u32);
        self.vars.push(VarDef { lo: 0, hi: 1 });
        id
    }

    fn new_int(&mut self, lo: i64, hi: i64) -> VarId {
        let id = VarId(self.vars.len() as u32);
        self.vars.push(VarDef { lo, hi });
        id
    }

    fn add_linear_eq(&mut self, terms: &[Term], rhs: i64) {
        self.constraints
            .push(LinearConstraint::new(terms.to_vec(), Comparator::Eq, rhs));
    }

    fn add_linear_le(&mut self, terms: &[Term], rhs: i64) {
        self.constraints
            .push(LinearConstraint::new(terms.to_vec(), Comparator::Le, rhs));
    }

    fn add_linear_ge(&mut self, terms: &[Term], rhs: i64) {
        self.constraints
            .push(LinearConstraint::new(terms.to_vec(), Comparator::Ge, rhs));
    }

    fn add_implication(&mut self, literal: VarId, constraint: LinearConstraint) {
        self.implications.push((literal, constraint));
    }

    fn minimize(&mut self, terms: &[Term]) {
        self.objective = terms.to_vec();
    }

    fn solve(&mut self, params: &SolverParams) -> Result<SolveOutcome> {
        let start = Instant::now();
        let full_deadline = start + Duration::from_secs(params.time_limit_seconds.max(1) as u64);

        if params.quick_solve_seconds > 0 {
            let quick_deadline =
                start + Duration::from_secs(params.quick_solve_seconds as u64);
            let mut quick = Search::new(self, quick_deadline, true);
            let outcome = quick.run();
            if let Search {
                best: Some((values, objective)),
                ..
            } = quick
            {
                self.values = values;
                self.solved = true;
                debug!(event = "quick_solve_hit", objective, "quick solve found a feasible solution");
                return Ok(SolveOutcome {
                    status: SolveStatusCode::Feasible,
                    objective_value: Some(objective),
                    wall_time: start.elapsed(),
                });
            }
            if matches!(outcome, SearchResult::ProvenInfeasible) {
                return Ok(SolveOutcome {
                    status: SolveStatusCode::Infeasible,
                    objective_value: None,
                    wall_time: start.elapsed(),
                });
            }
            debug!(event = "quick_solve_miss", "quick solve window elapsed without a solution, falling through");
        }

        let mut full = Search::new(self, full_deadline, false);
        let outcome = full.run();
        let wall_time = start.elapsed();

        match (outcome, full.best) {
            (SearchResult::ProvenInfeasible, _) => Ok(SolveOutcome {
                status: SolveStatusCode::Infeasible,
                objective_value: None,
                wall_time,
            }),
            (_, Some((values, objective))) => {
                self.values = values;
                self.solved = true;
                let status = if matches!(outcome, SearchResult::Exhausted) {
                    SolveStatusCode::Optimal
                } else {
                    SolveStatusCode::Feasible
                };
                Ok(SolveOutcome {
                    status,
                    objective_value: Some(objective),
                    wall_time,
                })
            }
            (_, None) => Ok(SolveOutcome {
                status: SolveStatusCode::Unknown,
                objective_value: None,
                wall_time,
            }),
        }
    }

    fn value_of(&self, var: VarId) -> i64 {
        if !self.solved {
            panic!("value_of called before a successful solve");
        }
        self.values[var.0 as usize]
    }
}

#[derive(Clone, Copy)]
enum SearchResult {
    /// Search space fully explored (within the deadline that mattered).
    Exhausted,
    /// Deadline hit before the search space was fully explored.
    TimedOut,
    /// Search space fully explored and no feasible assignment exists.
    ProvenInfeasible,
}

/// One run of branch-and-bound search over a [`ReferenceSolver`]'s model.
struct Search<'a> {
    vars: &'a [VarDef],
    constraints: &'a [LinearConstraint],
    implications: &'a [(VarId, LinearConstraint)],
    objective: &'a [Term],
    deadline: Instant,
    stop_at_first_feasible: bool,
    best: Option<(Vec<i64>, i64)>,
    nodes: u64,
    timed_out: bool,
}

impl<'a> Search<'a> {
    fn new(solver: &'a ReferenceSolver, deadline: Instant, stop_at_first_feasible: bool) -> Self {
        Self {
            vars: &solver.vars,
            constraints: &solver.constraints,
            implications: &solver.implications,
            objective: &solver.objective,
            deadline,
            stop_at_first_feasible,
            best: None,
            nodes: 0,
            timed_out: false,
        }
    }

    fn run(&mut self) -> SearchResult {
        let mut domains: Vec<(i64, i64)> = self.vars.iter().map(|v| (v.lo, v.hi)).collect();
        if propagate_all(&mut domains, self.constraints, self.implications).is_err() {
            return SearchResult::ProvenInfeasible;
        }
        self.dfs(domains);
        if self.timed_out {
            SearchResult::TimedOut
        } else if self.best.is_some() {
            SearchResult::Exhausted
        } else {
            SearchResult::ProvenInfeasible
        }
    }

    fn dfs(&mut self, domains: Vec<(i64, i64)>) {
        if self.timed_out {
            return;
        }
        self.nodes += 1;
        if self.nodes % 256 == 0 && Instant::now() >= self.deadline {
            self.timed_out = true;
            return;
        }

        let mut domains = domains;
        if propagate_all(&mut domains, self.constraints, self.implications).is_err() {
            return;
        }

        if let Some(best_obj) = self.best.as_ref().map(|(_, o)| *o) {
            let lower_bound = objective_lower_bound(self.objective, &domains);
            if lower_bound >= best_obj {
                return;
            }
        }

        match first_unassigned(&domains) {
            None => {
                let values: Vec<i64> = domains.iter().map(|(lo, _)| *lo).collect();
                if !all_constraints_hold(&values, self.constraints, self.implications) {
                    return;
                }
                let objective = evaluate(self.objective, &values);
                let better = self
                    .best
                    .as_ref()
                    .map(|(_, o)| objective < *o)
                    .unwrap_or(true);
                if better {
                    trace!(event = "improved_solution", objective, "branch-and-bound improved the incumbent");
                    self.best = Some((values, objective));
                }
                if self.stop_at_first_feasible {
                    self.timed_out = true; // stop further exploration, not a real timeout
                }
            }
            Some(branch_var) => {
                let (lo, hi) = domains[branch_var];
                for value in lo..=hi {
                    let mut branched = domains.clone();
                    branched[branch_var] = (value, value);
                    self.dfs(branched);
                    if self.timed_out {
                        return;
                    }
                }
            }
        }
    }
}

/// Picks the first variable with a non-singleton domain, preferring
/// variables with the smallest domain (most-constrained-first).
fn first_unassigned(domains: &[(i64, i64)]) -> Option<usize> {
    domains
        .iter()
        .enumerate()
        .filter(|(_, (lo, hi))| lo != hi)
        .min_by_key(|(_, (lo, hi))| hi - lo)
        .map(|(idx, _)| idx)
}

fn evaluate(terms: &[Term], values: &[i64]) -> i64 {
    terms.iter().map(|(v, c)| values[v.0 as usize] * c).sum()
}

fn objective_lower_bound(terms: &[Term], domains: &[(i64, i64)]) -> i64 {
    terms
        .iter()
        .map(|(v, c)| {
            let (lo, hi) = domains[v.0 as usize];
            if *c >= 0 {
                c * lo
            } else {
                c * hi
            }
        })
        .sum()
}

fn all_constraints_hold(
    values: &[i64],
    constraints: &[LinearConstraint],
    implications: &[(VarId, LinearConstraint)],
) -> bool {
    constraints.iter().all(|c| constraint_holds(c, values))
        && implications.iter().all(|(lit, c)| {
            values[lit.0 as usize] == 0 || constraint_holds(c, values)
        })
}

fn constraint_holds(c: &LinearConstraint, values: &[i64]) -> bool {
    let sum: i64 = c.terms.iter().map(|(v, coef)| values[v.0 as usize] * coef).sum();
    match c.op {
        Comparator::Eq => sum == c.rhs,
        Comparator::Le => sum <= c.rhs,
        Comparator::Ge => sum >= c.rhs,
    }
}

/// Runs interval propagation to a fixpoint across all unconditional
/// constraints plus any implication whose literal is currently forced true.
/// Returns `Err(())` the moment any constraint is proven unsatisfiable.
fn propagate_all(
    domains: &mut [(i64, i64)],
    constraints: &[LinearConstraint],
    implications: &[(VarId, LinearConstraint)],
) -> std::result::Result<(), ()> {
    loop {
        let mut changed = false;
        for c in constraints {
            if propagate_once(domains, c)? {
                changed = true;
            }
        }
        for (lit, c) in implications {
            let (lo, hi) = domains[lit.0 as usize];
            if lo == 1 && hi == 1 && propagate_once(domains, c)? {
                changed = true;
            }
        }
        if !changed {
            return Ok(());
        }
    }
}

/// Tightens `domains` using bounds (interval) consistency for one linear
/// constraint. Returns `Ok(true)` if any domain shrank, `Err(())` if the
/// constraint can no longer be satisfied.
fn propagate_once(
    domains: &mut [(i64, i64)],
    c: &LinearConstraint,
) -> std::result::Result<bool, ()> {
    let term_bounds: Vec<(i64, i64)> = c
        .terms
        .iter()
        .map(|&(v, coef)| {
            let (lo, hi) = domains[v.0 as usize];
            term_interval(coef, lo, hi)
        })
        .collect();
    let total_min: i64 = term_bounds.iter().map(|t| t.0).sum();
    let total_max: i64 = term_bounds.iter().map(|t| t.1).sum();

    match c.op {
        Comparator::Eq if total_min > c.rhs || total_max < c.rhs => return Err(()),
        Comparator::Le if total_min > c.rhs => return Err(()),
        Comparator::Ge if total_max < c.rhs => return Err(()),
        _ => {}
    }

    let mut changed = false;
    for (idx, &(v, coef)) in c.terms.iter().enumerate() {
        if coef == 0 {
            continue;
        }
        let rest_min = total_min - term_bounds[idx].0;
        let rest_max = total_max - term_bounds[idx].1;
        let (lo, hi) = domains[v.0 as usize];
        let mut new_lo = lo;
        let mut new_hi = hi;

        if matches!(c.op, Comparator::Eq | Comparator::Le) {
            let bound = c.rhs - rest_min;
            if coef > 0 {
                new_hi = new_hi.min(floor_div(bound, coef));
            } else {
                new_lo = new_lo.max(ceil_div(bound, coef));
            }
        }
        if matches!(c.op, Comparator::Eq | Comparator::Ge) {
            let bound = c.rhs - rest_max;
            if coef > 0 {
                new_lo = new_lo.max(ceil_div(bound, coef));
            } else {
                new_hi = new_hi.min(floor_div(bound, coef));
            }
        }

        if new_lo > new_hi {
            return Err(());
        }
        if new_lo != lo || new_hi != hi {
            domains[v.0 as usize] = (new_lo, new_hi);
            changed = true;
        }
    }
    Ok(changed)
}

fn term_interval(coef: i64, lo: i64, hi: i64) -> (i64, i64) {
    if coef >= 0 {
        (coef * lo, coef * hi)
    } else {
        (coef * hi, coef * lo)
    }
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) == (b < 0) {
        q + 1
    } else {
        q
    }
}

pub fn backend_error(message: impl Into<String>) -> CoreError {
    CoreError::Backend {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seconds: u32) -> SolverParams {
        SolverParams::default().with_time_limit(seconds)
    }

    #[test]
    fn solves_trivial_equality() {
        let mut s = ReferenceSolver::new();
        let x = s.new_bool();
        let y = s.new_bool();
        s.add_linear_eq(&[(x, 1), (y, 1)], 1);
        s.minimize(&[(x, 1)]);
        let outcome = s.solve(&params(5)).unwrap();
        assert_eq!(outcome.status, SolveStatusCode::Optimal);
        assert_eq!(s.value_of(x) + s.value_of(y), 1);
        assert_eq!(s.value_of(x), 0);
    }

    #[test]
    fn detects_infeasibility() {
        let mut s = ReferenceSolver::new();
        let x = s.new_bool();
        s.add_linear_eq(&[(x, 1)], 0);
        s.add_linear_eq(&[(x, 1)], 1);
        let outcome = s.solve(&params(5)).unwrap();
        assert_eq!(outcome.status, SolveStatusCode::Infeasible);
    }

    #[test]
    fn implication_fires_only_when_literal_is_true() {
        let mut s = ReferenceSolver::new();
        let lit = s.new_bool();
        let v = s.new_bool();
        // lit == 1 => v == 1
        s.add_implication(lit, LinearConstraint::new(vec![(v, 1)], Comparator::Eq, 1));
        s.add_linear_eq(&[(lit, 1)], 1);
        s.minimize(&[(v, 1)]);
        let outcome = s.solve(&params(5)).unwrap();
        assert_eq!(outcome.status, SolveStatusCode::Optimal);
        assert_eq!(s.value_of(lit), 1);
        assert_eq!(s.value_of(v), 1);
    }

    #[test]
    fn implication_does_not_fire_when_literal_is_false() {
        let mut s = ReferenceSolver::new();
        let lit = s.new_bool();
        let v = s.new_bool();
        s.add_implication(lit, LinearConstraint::new(vec![(v, 1)], Comparator::Eq, 1));
        s.add_linear_eq(&[(lit, 1)], 0);
        s.minimize(&[(v, 1)]);
        let outcome = s.solve(&params(5)).unwrap();
        assert_eq!(outcome.status, SolveStatusCode::Optimal);
        assert_eq!(s.value_of(lit), 0);
        assert_eq!(s.value_of(v), 0);
    }

    #[test]
    fn minimizes_objective_over_coverage() {
        let mut s = ReferenceSolver::new();
        let vars: Vec<_> = (0..3).map(|_| s.new_bool()).collect();
        s.add_linear_eq(
            &vars.iter().map(|&v| (v, 1)).collect::<Vec<_>>(),
            2,
        );
        s.minimize(&vars.iter().map(|&v| (v, 1)).collect::<Vec<_>>());
        let outcome = s.solve(&params(5)).unwrap();
        assert_eq!(outcome.status, SolveStatusCode::Optimal);
        assert_eq!(outcome.objective_value, Some(2));
    }
}
