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

/// A total 0/1 assignment returned by a solving engine, together with the
/// raw objective value the engine reported.
///
/// The objective is kept as `f64` because engines work in floating point;
/// consumers round it once, at interpretation time.
#[derive(Debug, Clone, PartialEq)]
pub struct IlpSolution {
    values: Vec<bool>,
    objective: f64,
}

impl IlpSolution {
    /// Constructs a new solution from a total assignment and the raw
    /// objective value.
    #[inline]
    pub fn new(values: Vec<bool>, objective: f64) -> Self {
        Self { values, objective }
    }

    /// Returns the value assigned to the given variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is not covered by this solution.
    #[inline]
    pub fn value(&self, var: VarId) -> bool {
        let index = var.get();
        debug_assert!(
            index < self.values.len(),
            "called `IlpSolution::value` with variable out of bounds: the len is {} but the handle is {}",
            self.values.len(),
            index
        );

        self.values[index]
    }

    /// Returns the full assignment, indexed by variable handle.
    #[inline]
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Returns the raw objective value reported by the engine.
    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Returns the number of variables covered by this solution.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }
}

/// The outcome of one solve call, mirroring the engine contract: a status
/// plus, when solvable, a total 0/1 assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// The engine found a solution and proved its optimality.
    Optimal(IlpSolution),
    /// The engine found a solution but did not prove optimality
    /// (e.g. it ran into its time budget with an incumbent).
    Feasible(IlpSolution),
    /// The engine proved that no assignment satisfies all constraints.
    Infeasible,
    /// The engine proved the objective unbounded.
    Unbounded,
    /// The engine failed (numeric trouble, timeout without incumbent, ...).
    Error(String),
}

impl SolveOutcome {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveOutcome::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_) | SolveOutcome::Feasible(_))
    }

    /// Returns the solution carried by `Optimal` or `Feasible` outcomes.
    #[inline]
    pub fn solution(&self) -> Option<&IlpSolution> {
        match self {
            SolveOutcome::Optimal(s) | SolveOutcome::Feasible(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveOutcome::Optimal(s) => write!(f, "Optimal(objective={})", s.objective()),
            SolveOutcome::Feasible(s) => write!(f, "Feasible(objective={})", s.objective()),
            SolveOutcome::Infeasible => write!(f, "Infeasible"),
            SolveOutcome::Unbounded => write!(f, "Unbounded"),
            SolveOutcome::Error(msg) => write!(f, "Error({msg})"),
        }
    }
}
