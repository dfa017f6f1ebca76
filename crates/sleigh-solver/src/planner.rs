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

//! The planner: the orchestrator of one planning run.
//!
//! `plan` walks the pipeline strictly in order (structural pre-check,
//! incidence layout, constraint assembly, engine solve, interpretation),
//! and every path terminates in exactly one [`PlanOutcome`]. The engine's
//! answer is never trusted as-is: the returned assignment is re-validated
//! against the assembled constraints, and the reported objective is
//! checked against the count of served children in the decoded
//! allocation. Either mismatch yields [`PlanResult::Aborted`] instead of
//! a wrong number.

use crate::{
    assemble::assemble,
    incidence::Incidence,
    outcome::{PlanOutcome, PlanResult, PlanStatistics, ToyAllocation},
    precheck::impossible_import_quota,
};
use sleigh_ilp::{
    backend::{GoodLpBackend, IlpBackend},
    outcome::{IlpSolution, SolveOutcome},
    problem::IlpProblem,
    var::VarId,
};
use sleigh_model::model::Model;
use std::time::{Duration, Instant};

/// A builder for [`Planner`].
///
/// # Examples
///
/// ```rust
/// use sleigh_solver::planner::Planner;
/// use std::time::Duration;
///
/// let planner = Planner::builder()
///     .with_time_limit(Duration::from_secs(30))
///     .build();
/// # let _ = planner;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder<B = GoodLpBackend> {
    backend: B,
    time_limit: Option<Duration>,
}

impl<B: IlpBackend> PlannerBuilder<B> {
    /// Sets the solving budget forwarded to the engine.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Swaps the solving engine.
    #[inline]
    pub fn with_backend<B2: IlpBackend>(self, backend: B2) -> PlannerBuilder<B2> {
        PlannerBuilder {
            backend,
            time_limit: self.time_limit,
        }
    }

    /// Consumes the builder and returns the configured [`Planner`].
    #[inline]
    pub fn build(self) -> Planner<B> {
        Planner {
            backend: self.backend,
            time_limit: self.time_limit,
        }
    }
}

/// The planner for the toy allocation problem.
#[derive(Debug, Clone)]
pub struct Planner<B = GoodLpBackend> {
    backend: B,
    time_limit: Option<Duration>,
}

impl Planner<GoodLpBackend> {
    /// Creates a planner with the default engine and no time limit.
    #[inline]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a [`PlannerBuilder`] with default settings.
    #[inline]
    pub fn builder() -> PlannerBuilder<GoodLpBackend> {
        PlannerBuilder::default()
    }
}

impl Default for Planner<GoodLpBackend> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<B: IlpBackend> Planner<B> {
    /// Runs the full planning pipeline for the given model.
    pub fn plan(&self, model: &Model) -> PlanOutcome {
        let start = Instant::now();
        let mut statistics = PlanStatistics::default();

        if let Some(country) = impossible_import_quota(model) {
            tracing::debug!(
                country_id = model.country_id(country),
                "import quota exceeds child count, instance is infeasible"
            );
            statistics.solve_duration = start.elapsed();
            return PlanOutcome::new(PlanResult::Infeasible, statistics);
        }

        let incidence = Incidence::build(model);
        tracing::debug!(
            num_vars = incidence.num_vars(),
            "laid out decision variables"
        );

        let problem = match assemble(model, &incidence) {
            Ok(problem) => problem,
            Err(err) => {
                tracing::debug!(%err, "assembly proved the instance infeasible");
                statistics.solve_duration = start.elapsed();
                return PlanOutcome::new(PlanResult::Infeasible, statistics);
            }
        };
        statistics.num_variables = problem.num_vars();
        statistics.num_constraints = problem.constraints().len();

        // No feasible pair at all (and, past the checks above, no positive
        // quota either): the empty allocation is optimal without an
        // engine call.
        if problem.num_vars() == 0 {
            statistics.solve_duration = start.elapsed();
            return PlanOutcome::new(
                PlanResult::Optimal(ToyAllocation::empty(model.num_children())),
                statistics,
            );
        }

        tracing::debug!(engine = self.backend.name(), "invoking engine");
        let outcome = self.backend.solve(&problem, self.time_limit);
        statistics.solve_duration = start.elapsed();

        let result = self.interpret(model, &incidence, &problem, outcome);
        PlanOutcome::new(result, statistics)
    }

    fn interpret(
        &self,
        model: &Model,
        incidence: &Incidence,
        problem: &IlpProblem,
        outcome: SolveOutcome,
    ) -> PlanResult {
        match outcome {
            SolveOutcome::Optimal(solution) => {
                match self.decode(model, incidence, problem, &solution) {
                    Ok(allocation) => PlanResult::Optimal(allocation),
                    Err(reason) => PlanResult::Aborted(reason),
                }
            }
            SolveOutcome::Feasible(solution) => {
                match self.decode(model, incidence, problem, &solution) {
                    Ok(allocation) => PlanResult::Feasible(allocation),
                    Err(reason) => PlanResult::Aborted(reason),
                }
            }
            SolveOutcome::Infeasible => PlanResult::Infeasible,
            // A maximization over finitely many binary variables is never
            // unbounded; reaching this arm means the engine went wrong.
            SolveOutcome::Unbounded => {
                PlanResult::Aborted("engine reported an unbounded objective".into())
            }
            SolveOutcome::Error(msg) => PlanResult::Aborted(msg),
        }
    }

    fn decode(
        &self,
        model: &Model,
        incidence: &Incidence,
        problem: &IlpProblem,
        solution: &IlpSolution,
    ) -> Result<ToyAllocation, String> {
        if !problem.satisfied_by(solution.values()) {
            return Err("engine returned an assignment violating the constraints".into());
        }

        let mut allocation = ToyAllocation::empty(model.num_children());
        for (index, &set) in solution.values().iter().enumerate() {
            if set {
                let (child, factory) = incidence.pair(VarId::new(index));
                allocation.assign(child, factory);
            }
        }

        let counted = allocation.satisfied_count() as i64;
        let reported = solution.objective().round() as i64;
        if counted != reported {
            return Err(format!(
                "engine objective {reported} disagrees with decoded allocation ({counted} served)"
            ));
        }

        Ok(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleigh_model::model::ModelBuilder;

    fn plan(model: &Model) -> PlanOutcome {
        Planner::new().plan(model)
    }

    #[test]
    fn test_single_child_single_factory() {
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 0).unwrap();
        builder.add_factory(1, 1, 1).unwrap();
        builder.add_child(1, 1, &[1]).unwrap();
        let model = builder.build();

        let outcome = plan(&model);
        assert!(outcome.result().is_optimal());
        assert_eq!(outcome.value(), 1);
    }

    #[test]
    fn test_stock_limits_served_children() {
        // Three children all want the one factory with stock 2.
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 0).unwrap();
        builder.add_factory(1, 1, 2).unwrap();
        builder.add_child(1, 1, &[1]).unwrap();
        builder.add_child(2, 1, &[1]).unwrap();
        builder.add_child(3, 1, &[1]).unwrap();
        let model = builder.build();

        assert_eq!(plan(&model).value(), 2);
    }

    #[test]
    fn test_precheck_short_circuits_to_infeasible() {
        // Quota of 2 over a single child.
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 2).unwrap();
        builder.add_factory(1, 1, 5).unwrap();
        builder.add_child(1, 1, &[1]).unwrap();
        let model = builder.build();

        let outcome = plan(&model);
        assert!(outcome.result().is_infeasible());
        assert_eq!(outcome.value(), -1);
        assert_eq!(outcome.statistics().num_variables, 0);
    }

    #[test]
    fn test_quota_without_stock_is_infeasible() {
        // The only wished factory has no stock, yet the quota demands a
        // delivery.
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 1).unwrap();
        builder.add_factory(1, 1, 0).unwrap();
        builder.add_child(1, 1, &[1]).unwrap();
        let model = builder.build();

        let outcome = plan(&model);
        assert!(outcome.result().is_infeasible());
        assert_eq!(outcome.value(), -1);
    }

    #[test]
    fn test_no_feasible_pairs_yields_zero_without_engine() {
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 0).unwrap();
        builder.add_factory(1, 1, 0).unwrap();
        builder.add_child(1, 1, &[1]).unwrap();
        let model = builder.build();

        let outcome = plan(&model);
        assert!(outcome.result().is_optimal());
        assert_eq!(outcome.value(), 0);
        assert_eq!(outcome.statistics().num_variables, 0);
    }

    #[test]
    fn test_export_cap_binds() {
        // Two foreign children want country 1's factory, but only one toy
        // may cross the border.
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 1, 0).unwrap();
        builder.add_country(2, 10, 0).unwrap();
        builder.add_factory(1, 1, 5).unwrap();
        builder.add_child(1, 2, &[1]).unwrap();
        builder.add_child(2, 2, &[1]).unwrap();
        let model = builder.build();

        assert_eq!(plan(&model).value(), 1);
    }

    #[test]
    fn test_allocation_is_consistent_with_count() {
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 0).unwrap();
        builder.add_factory(1, 1, 1).unwrap();
        builder.add_factory(2, 1, 1).unwrap();
        builder.add_child(1, 1, &[1, 2]).unwrap();
        builder.add_child(2, 1, &[1]).unwrap();
        let model = builder.build();

        let outcome = plan(&model);
        let allocation = outcome.result().allocation().unwrap();
        assert_eq!(allocation.satisfied_count(), 2);
        assert_eq!(outcome.value(), 2);

        // Every served child got a factory it actually wished for.
        for (child, factory) in allocation.assignments() {
            assert!(model.child_requests(child).contains(&factory));
        }
    }
}
