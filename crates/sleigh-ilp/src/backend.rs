// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The boundary to the external solving engine.
//!
//! Consumers hand an [`IlpProblem`] to an [`IlpBackend`] and get back a
//! [`SolveOutcome`]; nothing else about the engine (search strategy,
//! tolerances, internal parallelism) leaks through this trait.
//!
//! The default backend maps the problem onto `good_lp` with the pure-Rust
//! `microlp` solver, so a standard build solves instances without any
//! native library. Alternative engines can be plugged in by implementing
//! the trait.

use crate::{
    outcome::{IlpSolution, SolveOutcome},
    problem::{IlpProblem, Relation},
};
use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::time::Duration;

/// A solving engine for binary integer linear programs.
pub trait IlpBackend {
    /// A short human-readable engine name, for logs.
    fn name(&self) -> &'static str;

    /// Solves the given problem.
    ///
    /// `time_limit` is an optional solving budget, forwarded to the engine
    /// when it supports one. Exceeding the budget without an incumbent
    /// reports [`SolveOutcome::Error`]; with an incumbent,
    /// [`SolveOutcome::Feasible`].
    fn solve(&self, problem: &IlpProblem, time_limit: Option<Duration>) -> SolveOutcome;
}

/// The default engine: `good_lp` over the pure-Rust `microlp` solver.
///
/// `microlp` solves binary programs to optimality, so a successful solve
/// reports [`SolveOutcome::Optimal`]. It exposes no deadline hook; a
/// requested time budget is logged and not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    /// Creates a new `GoodLpBackend`.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl IlpBackend for GoodLpBackend {
    fn name(&self) -> &'static str {
        "good_lp/microlp"
    }

    fn solve(&self, problem: &IlpProblem, time_limit: Option<Duration>) -> SolveOutcome {
        if let Some(limit) = time_limit {
            tracing::debug!(?limit, "time limit requested but not enforced by microlp");
        }

        let mut vars = variables!();
        let handles: Vec<Variable> = (0..problem.num_vars())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective = problem
            .objective()
            .iter()
            .fold(Expression::from(0), |acc, &(var, coeff)| {
                acc + (coeff as f64) * handles[var.get()]
            });

        let mut model = vars.maximise(objective).using(default_solver);
        for c in problem.constraints() {
            let lhs = c
                .terms()
                .iter()
                .fold(Expression::from(0), |acc, &(var, coeff)| {
                    acc + (coeff as f64) * handles[var.get()]
                });
            let bound = c.bound() as f64;
            let constraint = match c.relation() {
                Relation::LessEq => constraint!(lhs <= bound),
                Relation::GreaterEq => constraint!(lhs >= bound),
                Relation::Equal => constraint!(lhs == bound),
            };
            model = model.with(constraint);
        }

        match model.solve() {
            Ok(sol) => {
                let values: Vec<bool> = handles.iter().map(|&h| sol.value(h) >= 0.5).collect();
                let objective: f64 = problem
                    .objective()
                    .iter()
                    .map(|&(var, coeff)| (coeff as f64) * sol.value(handles[var.get()]))
                    .sum();
                tracing::debug!(objective, "engine solved to optimality");
                SolveOutcome::Optimal(IlpSolution::new(values, objective))
            }
            Err(ResolutionError::Infeasible) => SolveOutcome::Infeasible,
            Err(ResolutionError::Unbounded) => SolveOutcome::Unbounded,
            Err(other) => SolveOutcome::Error(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{problem::LinearConstraint, var::VarId};

    fn v(i: usize) -> VarId {
        VarId::new(i)
    }

    fn unit_objective(problem: &mut IlpProblem) {
        for i in 0..problem.num_vars() {
            problem.add_objective_term(v(i), 1);
        }
    }

    #[test]
    fn test_solves_simple_maximum() {
        // maximize x0 + x1 + x2 subject to x0 + x1 <= 1
        let mut problem = IlpProblem::new(3);
        unit_objective(&mut problem);
        problem.add_constraint(LinearConstraint::sum_at_most([v(0), v(1)], 1));

        let outcome = GoodLpBackend::new().solve(&problem, None);
        let sol = outcome.solution().expect("expected a solution");
        assert!(outcome.is_optimal());
        assert_eq!(sol.objective().round() as i64, 2);
        assert!(problem.satisfied_by(sol.values()));
    }

    #[test]
    fn test_reports_infeasible() {
        // x0 >= 1 and x0 <= 0 cannot hold together.
        let mut problem = IlpProblem::new(1);
        unit_objective(&mut problem);
        problem.add_constraint(LinearConstraint::sum_at_least([v(0)], 1));
        problem.add_constraint(LinearConstraint::sum_at_most([v(0)], 0));

        let outcome = GoodLpBackend::new().solve(&problem, None);
        assert!(outcome.is_infeasible());
    }

    #[test]
    fn test_forced_assignment_is_respected() {
        // maximize x0 + x1 subject to x1 = 0: only x0 can be set.
        let mut problem = IlpProblem::new(2);
        unit_objective(&mut problem);
        problem.add_constraint(LinearConstraint::new(vec![(v(1), 1)], Relation::Equal, 0));

        let outcome = GoodLpBackend::new().solve(&problem, None);
        let sol = outcome.solution().expect("expected a solution");
        assert!(sol.value(v(0)));
        assert!(!sol.value(v(1)));
        assert_eq!(sol.objective().round() as i64, 1);
    }
}
