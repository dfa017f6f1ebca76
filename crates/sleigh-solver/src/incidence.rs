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

//! The sparse decision variable layer.
//!
//! One binary decision variable exists per (child, requested factory) pair
//! whose factory has positive stock, not per cell of the full
//! child × factory cross product. A variable for a zero-stock factory
//! could never take value 1 under the capacity constraint, so none is
//! created; this keeps the model size proportional to actual demand.
//!
//! Alongside the variables, four grouped indices are built in the same
//! single pass: by child, by factory, by exporting country (the factory's
//! country, for cross-country pairs only), and by the child's country.
//! Each constraint family later iterates exactly one precomputed group
//! instead of re-filtering the variable set, which also removes the risk
//! of two constraint builders disagreeing on a filter predicate.

use sleigh_ilp::var::VarId;
use sleigh_model::{
    index::{ChildIndex, CountryIndex, FactoryIndex},
    model::Model,
};

/// The sparse incidence structure: decision variables keyed by
/// (child, factory) pair, plus the grouped indices used by the constraint
/// assembler.
///
/// Variable handles are dense positions into `pairs`, assigned in child
/// order and, within a child, wish-list order; the layout is fully
/// deterministic for a given model.
#[derive(Debug, Clone)]
pub struct Incidence {
    pairs: Vec<(ChildIndex, FactoryIndex)>, // len = num_vars
    by_child: Vec<Vec<VarId>>,              // len = num_children
    by_factory: Vec<Vec<VarId>>,            // len = num_factories
    exports_by_country: Vec<Vec<VarId>>,    // len = num_countries
    demand_by_country: Vec<Vec<VarId>>,     // len = num_countries
}

impl Incidence {
    /// Builds the incidence structure for the given model in one pass
    /// over all wish-lists.
    pub fn build(model: &Model) -> Self {
        let mut pairs = Vec::new();
        let mut by_child = vec![Vec::new(); model.num_children()];
        let mut by_factory = vec![Vec::new(); model.num_factories()];
        let mut exports_by_country = vec![Vec::new(); model.num_countries()];
        let mut demand_by_country = vec![Vec::new(); model.num_countries()];

        for k in 0..model.num_children() {
            let child = ChildIndex::new(k);
            let child_country = model.child_country(child);

            for &factory in model.child_requests(child) {
                if model.factory_capacity(factory) == 0 {
                    continue;
                }

                let var = VarId::new(pairs.len());
                pairs.push((child, factory));
                by_child[k].push(var);
                by_factory[factory.get()].push(var);
                demand_by_country[child_country.get()].push(var);

                let factory_country = model.factory_country(factory);
                if factory_country != child_country {
                    exports_by_country[factory_country.get()].push(var);
                }
            }
        }

        Self {
            pairs,
            by_child,
            by_factory,
            exports_by_country,
            demand_by_country,
        }
    }

    /// Returns the number of decision variables.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.pairs.len()
    }

    /// Returns the (child, factory) pair a variable stands for.
    ///
    /// # Panics
    ///
    /// Panics if `var` is not a handle issued by this incidence.
    #[inline]
    pub fn pair(&self, var: VarId) -> (ChildIndex, FactoryIndex) {
        let index = var.get();
        debug_assert!(
            index < self.num_vars(),
            "called `Incidence::pair` with variable out of bounds: the len is {} but the handle is {}",
            self.num_vars(),
            index
        );

        self.pairs[index]
    }

    /// Returns all (child, factory) pairs, indexed by variable handle.
    #[inline]
    pub fn pairs(&self) -> &[(ChildIndex, FactoryIndex)] {
        &self.pairs
    }

    /// Returns the variables of the specified child.
    #[inline]
    pub fn vars_for_child(&self, child: ChildIndex) -> &[VarId] {
        let index = child.get();
        debug_assert!(
            index < self.by_child.len(),
            "called `Incidence::vars_for_child` with child index out of bounds: the len is {} but the index is {}",
            self.by_child.len(),
            index
        );

        &self.by_child[index]
    }

    /// Returns the variables incident to the specified factory.
    #[inline]
    pub fn vars_for_factory(&self, factory: FactoryIndex) -> &[VarId] {
        let index = factory.get();
        debug_assert!(
            index < self.by_factory.len(),
            "called `Incidence::vars_for_factory` with factory index out of bounds: the len is {} but the index is {}",
            self.by_factory.len(),
            index
        );

        &self.by_factory[index]
    }

    /// Returns the exporting variables of the specified country: pairs
    /// whose factory belongs to it while the child does not.
    #[inline]
    pub fn exports_from(&self, country: CountryIndex) -> &[VarId] {
        let index = country.get();
        debug_assert!(
            index < self.exports_by_country.len(),
            "called `Incidence::exports_from` with country index out of bounds: the len is {} but the index is {}",
            self.exports_by_country.len(),
            index
        );

        &self.exports_by_country[index]
    }

    /// Returns the variables whose child is registered in the specified
    /// country, regardless of the serving factory's country.
    #[inline]
    pub fn demand_of(&self, country: CountryIndex) -> &[VarId] {
        let index = country.get();
        debug_assert!(
            index < self.demand_by_country.len(),
            "called `Incidence::demand_of` with country index out of bounds: the len is {} but the index is {}",
            self.demand_by_country.len(),
            index
        );

        &self.demand_by_country[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleigh_model::model::ModelBuilder;

    /// Two countries; factory 1 (stock 5) in country 1, factory 2
    /// (stock 0) in country 1, factory 3 (stock 2) in country 2.
    /// Child 1 in country 2 wants all three; child 2 in country 1 wants
    /// factory 1.
    fn cross_border_model() -> Model {
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 0).unwrap();
        builder.add_country(2, 10, 0).unwrap();
        builder.add_factory(1, 1, 5).unwrap();
        builder.add_factory(2, 1, 0).unwrap();
        builder.add_factory(3, 2, 2).unwrap();
        builder.add_child(1, 2, &[1, 2, 3]).unwrap();
        builder.add_child(2, 1, &[1]).unwrap();
        builder.build()
    }

    #[test]
    fn test_zero_stock_factories_get_no_variables() {
        let model = cross_border_model();
        let incidence = Incidence::build(&model);

        // Child 1 contributes variables for factories 1 and 3 only.
        assert_eq!(incidence.num_vars(), 3);
        assert_eq!(incidence.vars_for_factory(FactoryIndex::new(1)), &[]);
        assert_eq!(
            incidence.pair(VarId::new(0)),
            (ChildIndex::new(0), FactoryIndex::new(0))
        );
        assert_eq!(
            incidence.pair(VarId::new(1)),
            (ChildIndex::new(0), FactoryIndex::new(2))
        );
    }

    #[test]
    fn test_groups_are_consistent() {
        let model = cross_border_model();
        let incidence = Incidence::build(&model);

        assert_eq!(incidence.vars_for_child(ChildIndex::new(0)).len(), 2);
        assert_eq!(incidence.vars_for_child(ChildIndex::new(1)).len(), 1);
        assert_eq!(incidence.vars_for_factory(FactoryIndex::new(0)).len(), 2);

        // Every variable appears in exactly one child group and one
        // factory group.
        let from_children: usize = (0..model.num_children())
            .map(|k| incidence.vars_for_child(ChildIndex::new(k)).len())
            .sum();
        let from_factories: usize = (0..model.num_factories())
            .map(|i| incidence.vars_for_factory(FactoryIndex::new(i)).len())
            .sum();
        assert_eq!(from_children, incidence.num_vars());
        assert_eq!(from_factories, incidence.num_vars());
    }

    #[test]
    fn test_export_group_excludes_domestic_pairs() {
        let model = cross_border_model();
        let incidence = Incidence::build(&model);

        // Country 1 exports only the (child 1, factory 1) pair; the
        // (child 2, factory 1) pair is domestic.
        let exports = incidence.exports_from(CountryIndex::new(0));
        assert_eq!(exports.len(), 1);
        assert_eq!(
            incidence.pair(exports[0]),
            (ChildIndex::new(0), FactoryIndex::new(0))
        );

        // Country 2's factory serves its own child only: no exports.
        assert_eq!(incidence.exports_from(CountryIndex::new(1)), &[]);
    }

    #[test]
    fn test_demand_group_ignores_factory_country() {
        let model = cross_border_model();
        let incidence = Incidence::build(&model);

        // Child 1 lives in country 2; both of its variables count toward
        // country 2's demand even though factory 1 is foreign.
        assert_eq!(incidence.demand_of(CountryIndex::new(1)).len(), 2);
        assert_eq!(incidence.demand_of(CountryIndex::new(0)).len(), 1);
    }
}
