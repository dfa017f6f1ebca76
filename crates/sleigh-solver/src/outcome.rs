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

//! The allocation, result, and statistics types produced by the planner.

use sleigh_model::index::{ChildIndex, FactoryIndex};
use std::time::Duration;

/// A concrete toy allocation: for each child, the factory serving it, or
/// `None` if the child goes without.
///
/// Stored as one `Option<FactoryIndex>` per child, indexed by
/// [`ChildIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToyAllocation {
    factories: Vec<Option<FactoryIndex>>, // len = num_children
}

impl ToyAllocation {
    /// Creates an allocation where no child receives a toy.
    #[inline]
    pub fn empty(num_children: usize) -> Self {
        Self {
            factories: vec![None; num_children],
        }
    }

    /// Creates an allocation from one entry per child.
    #[inline]
    pub fn new(factories: Vec<Option<FactoryIndex>>) -> Self {
        Self { factories }
    }

    /// Assigns the given factory to the given child.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not in `0..num_children()`.
    #[inline]
    pub fn assign(&mut self, child: ChildIndex, factory: FactoryIndex) {
        let index = child.get();
        debug_assert!(
            index < self.factories.len(),
            "called `ToyAllocation::assign` with child index out of bounds: the len is {} but the index is {}",
            self.factories.len(),
            index
        );

        self.factories[index] = Some(factory);
    }

    /// Returns the number of children covered by this allocation.
    #[inline]
    pub fn num_children(&self) -> usize {
        self.factories.len()
    }

    /// Returns the factory serving the given child, or `None` if the
    /// child goes without a toy.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not in `0..num_children()`.
    #[inline]
    pub fn factory_for_child(&self, child: ChildIndex) -> Option<FactoryIndex> {
        let index = child.get();
        debug_assert!(
            index < self.factories.len(),
            "called `ToyAllocation::factory_for_child` with child index out of bounds: the len is {} but the index is {}",
            self.factories.len(),
            index
        );

        self.factories[index]
    }

    /// Returns the number of children that receive a toy.
    #[inline]
    pub fn satisfied_count(&self) -> u64 {
        self.factories.iter().filter(|f| f.is_some()).count() as u64
    }

    /// Iterates over the served (child, factory) pairs in child order.
    pub fn assignments(&self) -> impl Iterator<Item = (ChildIndex, FactoryIndex)> + '_ {
        self.factories
            .iter()
            .enumerate()
            .filter_map(|(k, f)| f.map(|factory| (ChildIndex::new(k), factory)))
    }
}

impl std::fmt::Display for ToyAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "ToyAllocation ({}/{} children served)",
            self.satisfied_count(),
            self.num_children()
        )?;
        writeln!(f, "{:>8} | {:>8}", "Child", "Factory")?;
        writeln!(f, "---------+---------")?;
        for (k, factory) in self.factories.iter().enumerate() {
            match factory {
                Some(factory) => writeln!(f, "{:>8} | {:>8}", k, factory.get())?,
                None => writeln!(f, "{:>8} | {:>8}", k, "-")?,
            }
        }
        Ok(())
    }
}

/// The terminal result of one planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanResult {
    /// An allocation proven to maximize the number of served children.
    Optimal(ToyAllocation),
    /// A valid allocation without a proof of optimality (the engine ran
    /// into its budget with an incumbent).
    Feasible(ToyAllocation),
    /// No allocation satisfies all constraints.
    Infeasible,
    /// The run ended without a usable answer; the payload describes why.
    Aborted(String),
}

impl PlanResult {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, PlanResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, PlanResult::Infeasible)
    }

    /// Returns the allocation carried by `Optimal` or `Feasible` results.
    #[inline]
    pub fn allocation(&self) -> Option<&ToyAllocation> {
        match self {
            PlanResult::Optimal(a) | PlanResult::Feasible(a) => Some(a),
            _ => None,
        }
    }
}

/// Statistics recorded over one planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanStatistics {
    /// Number of decision variables in the assembled program.
    pub num_variables: usize,
    /// Number of constraint rows in the assembled program.
    pub num_constraints: usize,
    /// Wall-clock duration of the whole run, engine call included.
    pub solve_duration: Duration,
}

impl std::fmt::Display for PlanStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PlanStatistics(variables: {}, constraints: {}, duration: {:?})",
            self.num_variables, self.num_constraints, self.solve_duration
        )
    }
}

/// The complete outcome of one planning run: the result plus the
/// statistics gathered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    result: PlanResult,
    statistics: PlanStatistics,
}

impl PlanOutcome {
    /// Constructs a new outcome from its parts.
    #[inline]
    pub fn new(result: PlanResult, statistics: PlanStatistics) -> Self {
        Self { result, statistics }
    }

    /// Returns the result of the run.
    #[inline]
    pub fn result(&self) -> &PlanResult {
        &self.result
    }

    /// Returns the statistics of the run.
    #[inline]
    pub fn statistics(&self) -> &PlanStatistics {
        &self.statistics
    }

    /// Returns the number of served children, or `None` if the run
    /// produced no allocation.
    #[inline]
    pub fn satisfied_children(&self) -> Option<u64> {
        self.result.allocation().map(ToyAllocation::satisfied_count)
    }

    /// Returns the single-number answer: the served-children count, or
    /// `-1` for infeasible and aborted runs.
    #[inline]
    pub fn value(&self) -> i64 {
        match self.satisfied_children() {
            Some(count) => count as i64,
            None => -1,
        }
    }
}
