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

//! The constraint assembler and objective builder.
//!
//! Four constraint families are emitted over the incidence groups:
//!
//! 1. Per child: at most one of its variables may be set (one toy each).
//! 2. Per factory: set variables may not exceed its stock.
//! 3. Per country: toys reaching its children must meet the minimum
//!    import quota, counting deliveries from any factory.
//! 4. Per country: cross-border deliveries from its factories may not
//!    exceed its export cap.
//!
//! Families 2 and 4 skip constraints that cannot bind: a factory whose
//! incident variable count stays within its stock, or a country whose
//! cross-border pair count stays within its cap, needs no row. Family 3
//! has the opposite character: a positive quota over an empty variable
//! group can never be met, so assembly stops with [`UnmeetableQuota`]
//! instead of emitting a row no assignment satisfies.
//!
//! The objective gives every variable coefficient 1: maximizing set
//! variables is maximizing satisfied children, because family 1 caps
//! each child at one.

use crate::incidence::Incidence;
use sleigh_ilp::{
    problem::{IlpProblem, LinearConstraint},
    var::VarId,
};
use sleigh_model::{
    index::{ChildIndex, CountryIndex, FactoryIndex},
    model::Model,
};

/// The error type for constraint assembly: a country demands more
/// domestic deliveries than its children can possibly receive.
///
/// This arises when a country has a positive minimum import quota but
/// none of its children holds a feasible request (no wished factory with
/// stock). The instance is infeasible without consulting the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmeetableQuota {
    /// The country whose quota cannot be met.
    pub country: CountryIndex,
}

impl std::fmt::Display for UnmeetableQuota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Country {} has a positive import quota but no feasible deliveries",
            self.country
        )
    }
}

impl std::error::Error for UnmeetableQuota {}

/// Assembles the full integer linear program for the given model and
/// incidence structure.
///
/// # Errors
///
/// Returns [`UnmeetableQuota`] if a country with a positive import quota
/// has no feasible (child, factory) pair at all.
pub fn assemble(model: &Model, incidence: &Incidence) -> Result<IlpProblem, UnmeetableQuota> {
    let mut problem = IlpProblem::new(incidence.num_vars());

    add_objective(&mut problem);
    add_child_uniqueness(model, incidence, &mut problem);
    add_factory_stock(model, incidence, &mut problem);
    add_import_quotas(model, incidence, &mut problem)?;
    add_export_caps(model, incidence, &mut problem);

    tracing::debug!(
        num_vars = problem.num_vars(),
        num_constraints = problem.constraints().len(),
        "assembled integer program"
    );

    Ok(problem)
}

fn add_objective(problem: &mut IlpProblem) {
    for i in 0..problem.num_vars() {
        problem.add_objective_term(VarId::new(i), 1);
    }
}

fn add_child_uniqueness(model: &Model, incidence: &Incidence, problem: &mut IlpProblem) {
    for k in 0..model.num_children() {
        let vars = incidence.vars_for_child(ChildIndex::new(k));
        if vars.is_empty() {
            continue;
        }

        problem.add_constraint(LinearConstraint::sum_at_most(vars.iter().copied(), 1));
    }
}

fn add_factory_stock(model: &Model, incidence: &Incidence, problem: &mut IlpProblem) {
    for i in 0..model.num_factories() {
        let factory = FactoryIndex::new(i);
        let vars = incidence.vars_for_factory(factory);
        let capacity = model.factory_capacity(factory);

        // Fewer incident pairs than stock: the row can never bind.
        if (vars.len() as u64) <= capacity {
            continue;
        }

        problem.add_constraint(LinearConstraint::sum_at_most(
            vars.iter().copied(),
            clamp_bound(capacity),
        ));
    }
}

fn add_import_quotas(
    model: &Model,
    incidence: &Incidence,
    problem: &mut IlpProblem,
) -> Result<(), UnmeetableQuota> {
    for j in 0..model.num_countries() {
        let country = CountryIndex::new(j);
        let quota = model.import_quota(country);
        if quota == 0 {
            continue;
        }

        let vars = incidence.demand_of(country);
        if vars.is_empty() {
            return Err(UnmeetableQuota { country });
        }

        problem.add_constraint(LinearConstraint::sum_at_least(
            vars.iter().copied(),
            clamp_bound(quota),
        ));
    }

    Ok(())
}

fn add_export_caps(model: &Model, incidence: &Incidence, problem: &mut IlpProblem) {
    for j in 0..model.num_countries() {
        let country = CountryIndex::new(j);
        let vars = incidence.exports_from(country);
        let cap = model.export_limit(country);

        if (vars.len() as u64) <= cap {
            continue;
        }

        problem.add_constraint(LinearConstraint::sum_at_most(
            vars.iter().copied(),
            clamp_bound(cap),
        ));
    }
}

#[inline]
fn clamp_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
