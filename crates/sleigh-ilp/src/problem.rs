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

use crate::var::VarId;

/// The relation of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The linear combination must be less than or equal to the bound.
    LessEq,
    /// The linear combination must be greater than or equal to the bound.
    GreaterEq,
    /// The linear combination must equal the bound.
    Equal,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::LessEq => write!(f, "<="),
            Relation::GreaterEq => write!(f, ">="),
            Relation::Equal => write!(f, "="),
        }
    }
}

/// One linear constraint: an integer-coefficient combination of binary
/// variables, a relation, and an integer bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    terms: Vec<(VarId, i64)>,
    relation: Relation,
    bound: i64,
}

impl LinearConstraint {
    /// Constructs a new constraint from its parts.
    #[inline]
    pub fn new(terms: Vec<(VarId, i64)>, relation: Relation, bound: i64) -> Self {
        Self {
            terms,
            relation,
            bound,
        }
    }

    /// Constructs `sum(vars) <= bound` with unit coefficients.
    #[inline]
    pub fn sum_at_most<I>(vars: I, bound: i64) -> Self
    where
        I: IntoIterator<Item = VarId>,
    {
        Self::new(
            vars.into_iter().map(|v| (v, 1)).collect(),
            Relation::LessEq,
            bound,
        )
    }

    /// Constructs `sum(vars) >= bound` with unit coefficients.
    #[inline]
    pub fn sum_at_least<I>(vars: I, bound: i64) -> Self
    where
        I: IntoIterator<Item = VarId>,
    {
        Self::new(
            vars.into_iter().map(|v| (v, 1)).collect(),
            Relation::GreaterEq,
            bound,
        )
    }

    /// Returns the terms of this constraint.
    #[inline]
    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    /// Returns the relation of this constraint.
    #[inline]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Returns the bound of this constraint.
    #[inline]
    pub fn bound(&self) -> i64 {
        self.bound
    }

    /// Evaluates the linear combination under the given 0/1 assignment.
    ///
    /// # Panics
    ///
    /// Panics if a term references a variable outside `values`.
    pub fn evaluate(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| values[var.get()])
            .map(|&(_, coeff)| coeff)
            .sum()
    }

    /// Returns `true` if the given 0/1 assignment satisfies this
    /// constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let lhs = self.evaluate(values);
        match self.relation {
            Relation::LessEq => lhs <= self.bound,
            Relation::GreaterEq => lhs >= self.bound,
            Relation::Equal => lhs == self.bound,
        }
    }
}

/// An integer linear program over binary variables with one maximization
/// objective.
///
/// The problem is pure data: building it performs no solving. Variables are
/// the half-open handle range `0..num_vars`; the objective and every
/// constraint reference variables from that range only (checked by debug
/// assertions).
///
/// # Examples
///
/// ```rust
/// use sleigh_ilp::problem::{IlpProblem, LinearConstraint};
/// use sleigh_ilp::var::VarId;
///
/// // maximize x0 + x1 subject to x0 + x1 <= 1
/// let mut problem = IlpProblem::new(2);
/// problem.add_objective_term(VarId::new(0), 1);
/// problem.add_objective_term(VarId::new(1), 1);
/// problem.add_constraint(LinearConstraint::sum_at_most(
///     [VarId::new(0), VarId::new(1)],
///     1,
/// ));
///
/// assert!(problem.satisfied_by(&[true, false]));
/// assert!(!problem.satisfied_by(&[true, true]));
/// assert_eq!(problem.objective_of(&[true, false]), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IlpProblem {
    num_vars: usize,
    objective: Vec<(VarId, i64)>,
    constraints: Vec<LinearConstraint>,
}

impl IlpProblem {
    /// Creates a problem over the variable handles `0..num_vars` with an
    /// empty objective and no constraints.
    #[inline]
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            objective: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Returns the number of variables in this problem.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Returns the objective terms (maximization sense).
    #[inline]
    pub fn objective(&self) -> &[(VarId, i64)] {
        &self.objective
    }

    /// Returns the constraints of this problem.
    #[inline]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Adds one term to the maximization objective.
    #[inline]
    pub fn add_objective_term(&mut self, var: VarId, coeff: i64) -> &mut Self {
        debug_assert!(
            var.get() < self.num_vars,
            "called `IlpProblem::add_objective_term` with variable out of bounds: the len is {} but the handle is {}",
            self.num_vars,
            var.get()
        );

        self.objective.push((var, coeff));
        self
    }

    /// Adds a constraint to the problem.
    #[inline]
    pub fn add_constraint(&mut self, constraint: LinearConstraint) -> &mut Self {
        debug_assert!(
            constraint.terms().iter().all(|(v, _)| v.get() < self.num_vars),
            "called `IlpProblem::add_constraint` with a variable out of bounds: the len is {}",
            self.num_vars
        );

        self.constraints.push(constraint);
        self
    }

    /// Evaluates the objective under the given 0/1 assignment.
    pub fn objective_of(&self, values: &[bool]) -> i64 {
        self.objective
            .iter()
            .filter(|(var, _)| values[var.get()])
            .map(|&(_, coeff)| coeff)
            .sum()
    }

    /// Returns `true` if the given 0/1 assignment is total and satisfies
    /// every constraint of this problem.
    ///
    /// Solving engines are external; their answers are re-validated through
    /// this check before being trusted.
    pub fn satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.num_vars
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }
}
