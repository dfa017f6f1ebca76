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

use crate::index::{ChildIndex, CountryIndex, FactoryIndex};
use rustc_hash::FxHashMap;

/// The error type for model construction.
///
/// Every variant is terminal: a model that trips any of these checks is
/// invalid as a whole and no partial model is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelBuildError {
    /// Two factories share the same external identifier.
    DuplicateFactoryId(u64),
    /// Two countries share the same external identifier.
    DuplicateCountryId(u64),
    /// Two children share the same external identifier.
    DuplicateChildId(u64),
    /// A factory or child references a country id that was never added.
    UnknownCountry { country_id: u64 },
    /// A child requests a factory id that was never added.
    UnknownFactory { child_id: u64, factory_id: u64 },
    /// A child was added with an empty wish-list.
    EmptyWishList { child_id: u64 },
}

impl std::fmt::Display for ModelBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFactoryId(id) => write!(f, "Duplicate factory id {id}"),
            Self::DuplicateCountryId(id) => write!(f, "Duplicate country id {id}"),
            Self::DuplicateChildId(id) => write!(f, "Duplicate child id {id}"),
            Self::UnknownCountry { country_id } => {
                write!(f, "Reference to unknown country id {country_id}")
            }
            Self::UnknownFactory {
                child_id,
                factory_id,
            } => write!(
                f,
                "Child {child_id} requests unknown factory id {factory_id}"
            ),
            Self::EmptyWishList { child_id } => {
                write!(f, "Child {child_id} has an empty wish-list")
            }
        }
    }
}

impl std::error::Error for ModelBuildError {}

/// The immutable data model describing factories, countries, and children.
///
/// This struct holds all pre-validated, queryable data in a Structure of
/// Arrays (SoA) layout, indexed by the dense typed indices from
/// [`crate::index`]:
///
/// - `factory_capacities[i]`: toy stock of factory `i`.
/// - `factory_countries[i]`: owning country of factory `i`.
/// - `country_export_limits[j]` / `country_import_quotas[j]`: the export cap
///   and minimum domestic fulfillment of country `j`.
/// - `country_child_counts[j]`: number of children registered in country `j`
///   (derived during `build`, used by the structural feasibility pre-check).
/// - `child_countries[k]` / `child_requests[k]`: owning country and
///   deduplicated wish-list of child `k`.
///
/// External identifiers from the input are retained per entity for
/// diagnostics only; no lookup path depends on them after construction.
///
/// Construction:
/// - Use [`ModelBuilder`] and call [`ModelBuilder::build`] to obtain a
///   validated `Model`.
#[derive(Clone, Debug)]
pub struct Model {
    factory_ids: Vec<u64>,                  // len = num_factories
    factory_countries: Vec<CountryIndex>,   // len = num_factories
    factory_capacities: Vec<u64>,           // len = num_factories
    country_ids: Vec<u64>,                  // len = num_countries
    country_export_limits: Vec<u64>,        // len = num_countries
    country_import_quotas: Vec<u64>,        // len = num_countries
    country_child_counts: Vec<u64>,         // len = num_countries
    child_ids: Vec<u64>,                    // len = num_children
    child_countries: Vec<CountryIndex>,     // len = num_children
    child_requests: Vec<Vec<FactoryIndex>>, // len = num_children
}

impl Model {
    /// Returns the number of factories in the model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use sleigh_model::model::ModelBuilder;
    /// let mut builder = ModelBuilder::new();
    /// builder.add_country(1, 0, 0).unwrap();
    /// builder.add_factory(1, 1, 5).unwrap();
    /// let model = builder.build();
    /// assert_eq!(model.num_factories(), 1);
    /// ```
    #[inline]
    pub fn num_factories(&self) -> usize {
        self.factory_capacities.len()
    }

    /// Returns the number of countries in the model.
    #[inline]
    pub fn num_countries(&self) -> usize {
        self.country_export_limits.len()
    }

    /// Returns the number of children in the model.
    #[inline]
    pub fn num_children(&self) -> usize {
        self.child_requests.len()
    }

    /// Returns the external identifier of the specified factory.
    ///
    /// # Panics
    ///
    /// Panics if `factory_index` is not in `0..num_factories()`.
    #[inline]
    pub fn factory_id(&self, factory_index: FactoryIndex) -> u64 {
        let index = factory_index.get();
        debug_assert!(
            index < self.num_factories(),
            "called `Model::factory_id` with factory index out of bounds: the len is {} but the index is {}",
            self.num_factories(),
            index
        );

        self.factory_ids[index]
    }

    /// Returns the owning country of the specified factory.
    ///
    /// # Panics
    ///
    /// Panics if `factory_index` is not in `0..num_factories()`.
    #[inline]
    pub fn factory_country(&self, factory_index: FactoryIndex) -> CountryIndex {
        let index = factory_index.get();
        debug_assert!(
            index < self.num_factories(),
            "called `Model::factory_country` with factory index out of bounds: the len is {} but the index is {}",
            self.num_factories(),
            index
        );

        self.factory_countries[index]
    }

    /// Returns the toy stock of the specified factory.
    ///
    /// # Panics
    ///
    /// Panics if `factory_index` is not in `0..num_factories()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use sleigh_model::{index::FactoryIndex, model::ModelBuilder};
    /// let mut builder = ModelBuilder::new();
    /// builder.add_country(1, 0, 0).unwrap();
    /// let f = builder.add_factory(7, 1, 5).unwrap();
    /// let model = builder.build();
    /// assert_eq!(model.factory_capacity(f), 5);
    /// assert_eq!(model.factory_id(f), 7);
    /// ```
    #[inline]
    pub fn factory_capacity(&self, factory_index: FactoryIndex) -> u64 {
        let index = factory_index.get();
        debug_assert!(
            index < self.num_factories(),
            "called `Model::factory_capacity` with factory index out of bounds: the len is {} but the index is {}",
            self.num_factories(),
            index
        );

        self.factory_capacities[index]
    }

    /// Returns the external identifier of the specified country.
    ///
    /// # Panics
    ///
    /// Panics if `country_index` is not in `0..num_countries()`.
    #[inline]
    pub fn country_id(&self, country_index: CountryIndex) -> u64 {
        let index = country_index.get();
        debug_assert!(
            index < self.num_countries(),
            "called `Model::country_id` with country index out of bounds: the len is {} but the index is {}",
            self.num_countries(),
            index
        );

        self.country_ids[index]
    }

    /// Returns the maximum number of toys the specified country's factories
    /// may send to children registered in other countries.
    ///
    /// # Panics
    ///
    /// Panics if `country_index` is not in `0..num_countries()`.
    #[inline]
    pub fn export_limit(&self, country_index: CountryIndex) -> u64 {
        let index = country_index.get();
        debug_assert!(
            index < self.num_countries(),
            "called `Model::export_limit` with country index out of bounds: the len is {} but the index is {}",
            self.num_countries(),
            index
        );

        self.country_export_limits[index]
    }

    /// Returns the minimum number of toys that must reach children
    /// registered in the specified country, from any factory.
    ///
    /// # Panics
    ///
    /// Panics if `country_index` is not in `0..num_countries()`.
    #[inline]
    pub fn import_quota(&self, country_index: CountryIndex) -> u64 {
        let index = country_index.get();
        debug_assert!(
            index < self.num_countries(),
            "called `Model::import_quota` with country index out of bounds: the len is {} but the index is {}",
            self.num_countries(),
            index
        );

        self.country_import_quotas[index]
    }

    /// Returns the number of children registered in the specified country.
    ///
    /// # Panics
    ///
    /// Panics if `country_index` is not in `0..num_countries()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use sleigh_model::model::ModelBuilder;
    /// let mut builder = ModelBuilder::new();
    /// let c = builder.add_country(1, 0, 0).unwrap();
    /// builder.add_factory(1, 1, 5).unwrap();
    /// builder.add_child(1, 1, &[1]).unwrap();
    /// builder.add_child(2, 1, &[1]).unwrap();
    /// let model = builder.build();
    /// assert_eq!(model.children_in_country(c), 2);
    /// ```
    #[inline]
    pub fn children_in_country(&self, country_index: CountryIndex) -> u64 {
        let index = country_index.get();
        debug_assert!(
            index < self.num_countries(),
            "called `Model::children_in_country` with country index out of bounds: the len is {} but the index is {}",
            self.num_countries(),
            index
        );

        self.country_child_counts[index]
    }

    /// Returns the external identifier of the specified child.
    ///
    /// # Panics
    ///
    /// Panics if `child_index` is not in `0..num_children()`.
    #[inline]
    pub fn child_id(&self, child_index: ChildIndex) -> u64 {
        let index = child_index.get();
        debug_assert!(
            index < self.num_children(),
            "called `Model::child_id` with child index out of bounds: the len is {} but the index is {}",
            self.num_children(),
            index
        );

        self.child_ids[index]
    }

    /// Returns the country the specified child is registered in.
    ///
    /// # Panics
    ///
    /// Panics if `child_index` is not in `0..num_children()`.
    #[inline]
    pub fn child_country(&self, child_index: ChildIndex) -> CountryIndex {
        let index = child_index.get();
        debug_assert!(
            index < self.num_children(),
            "called `Model::child_country` with child index out of bounds: the len is {} but the index is {}",
            self.num_children(),
            index
        );

        self.child_countries[index]
    }

    /// Returns the deduplicated wish-list of the specified child, in
    /// request order.
    ///
    /// # Panics
    ///
    /// Panics if `child_index` is not in `0..num_children()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use sleigh_model::model::ModelBuilder;
    /// let mut builder = ModelBuilder::new();
    /// builder.add_country(1, 0, 0).unwrap();
    /// let f1 = builder.add_factory(1, 1, 5).unwrap();
    /// let f2 = builder.add_factory(2, 1, 5).unwrap();
    /// // Duplicate request for factory 1 is ignored.
    /// let k = builder.add_child(1, 1, &[1, 2, 1]).unwrap();
    /// let model = builder.build();
    /// assert_eq!(model.child_requests(k), &[f1, f2]);
    /// ```
    #[inline]
    pub fn child_requests(&self, child_index: ChildIndex) -> &[FactoryIndex] {
        let index = child_index.get();
        debug_assert!(
            index < self.num_children(),
            "called `Model::child_requests` with child index out of bounds: the len is {} but the index is {}",
            self.num_children(),
            index
        );

        &self.child_requests[index]
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(num_factories: {}, num_countries: {}, num_children: {})",
            self.num_factories(),
            self.num_countries(),
            self.num_children()
        )
    }
}

/// A validating builder for [`Model`].
///
/// Unlike an index-addressed builder, every `add_*` call here is fallible:
/// identity errors (duplicate ids, references to unknown entities) are
/// input errors in this domain and abort model construction as a whole.
///
/// Countries must be added before the factories and children that reference
/// them, and factories before the children that request them. The
/// [`InstanceLoader`](crate::loading::InstanceLoader) buffers its records to
/// satisfy this ordering.
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    factory_ids: Vec<u64>,
    factory_countries: Vec<CountryIndex>,
    factory_capacities: Vec<u64>,
    country_ids: Vec<u64>,
    country_export_limits: Vec<u64>,
    country_import_quotas: Vec<u64>,
    country_child_counts: Vec<u64>,
    child_ids: Vec<u64>,
    child_countries: Vec<CountryIndex>,
    child_requests: Vec<Vec<FactoryIndex>>,
    factory_index_by_id: FxHashMap<u64, FactoryIndex>,
    country_index_by_id: FxHashMap<u64, CountryIndex>,
    child_index_by_id: FxHashMap<u64, ChildIndex>,
}

impl ModelBuilder {
    /// Creates an empty `ModelBuilder`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of factories added so far.
    #[inline]
    pub fn num_factories(&self) -> usize {
        self.factory_capacities.len()
    }

    /// Returns the number of countries added so far.
    #[inline]
    pub fn num_countries(&self) -> usize {
        self.country_export_limits.len()
    }

    /// Returns the number of children added so far.
    #[inline]
    pub fn num_children(&self) -> usize {
        self.child_requests.len()
    }

    /// Adds a country with the given external id, export cap, and minimum
    /// import quota. Returns its dense index.
    ///
    /// # Errors
    ///
    /// Returns [`ModelBuildError::DuplicateCountryId`] if a country with the
    /// same id was already added.
    pub fn add_country(
        &mut self,
        id: u64,
        export_max: u64,
        min_import: u64,
    ) -> Result<CountryIndex, ModelBuildError> {
        if self.country_index_by_id.contains_key(&id) {
            return Err(ModelBuildError::DuplicateCountryId(id));
        }

        let index = CountryIndex::new(self.num_countries());
        self.country_index_by_id.insert(id, index);
        self.country_ids.push(id);
        self.country_export_limits.push(export_max);
        self.country_import_quotas.push(min_import);
        self.country_child_counts.push(0);
        Ok(index)
    }

    /// Adds a factory with the given external id, owning country id, and
    /// toy stock. Returns its dense index.
    ///
    /// # Errors
    ///
    /// Returns [`ModelBuildError::DuplicateFactoryId`] if a factory with the
    /// same id was already added, or [`ModelBuildError::UnknownCountry`] if
    /// the owning country was never added.
    pub fn add_factory(
        &mut self,
        id: u64,
        country_id: u64,
        capacity: u64,
    ) -> Result<FactoryIndex, ModelBuildError> {
        let country = *self
            .country_index_by_id
            .get(&country_id)
            .ok_or(ModelBuildError::UnknownCountry { country_id })?;

        if self.factory_index_by_id.contains_key(&id) {
            return Err(ModelBuildError::DuplicateFactoryId(id));
        }

        let index = FactoryIndex::new(self.num_factories());
        self.factory_index_by_id.insert(id, index);
        self.factory_ids.push(id);
        self.factory_countries.push(country);
        self.factory_capacities.push(capacity);
        Ok(index)
    }

    /// Adds a child with the given external id, owning country id, and
    /// wish-list of factory ids. Duplicate wishes are ignored; the
    /// deduplicated list keeps request order. Returns the child's dense
    /// index.
    ///
    /// # Errors
    ///
    /// Returns an error if the child id is a duplicate, the country is
    /// unknown, any requested factory is unknown, or the wish-list is
    /// empty.
    pub fn add_child(
        &mut self,
        id: u64,
        country_id: u64,
        requested_factory_ids: &[u64],
    ) -> Result<ChildIndex, ModelBuildError> {
        if requested_factory_ids.is_empty() {
            return Err(ModelBuildError::EmptyWishList { child_id: id });
        }

        let country = *self
            .country_index_by_id
            .get(&country_id)
            .ok_or(ModelBuildError::UnknownCountry { country_id })?;

        let mut requests = Vec::with_capacity(requested_factory_ids.len());
        for &factory_id in requested_factory_ids {
            let factory = *self.factory_index_by_id.get(&factory_id).ok_or(
                ModelBuildError::UnknownFactory {
                    child_id: id,
                    factory_id,
                },
            )?;
            if !requests.contains(&factory) {
                requests.push(factory);
            }
        }

        if self.child_index_by_id.contains_key(&id) {
            return Err(ModelBuildError::DuplicateChildId(id));
        }

        let index = ChildIndex::new(self.num_children());
        self.child_index_by_id.insert(id, index);
        self.child_ids.push(id);
        self.child_countries.push(country);
        self.child_requests.push(requests);
        self.country_child_counts[country.get()] += 1;
        Ok(index)
    }

    /// Consumes the builder and returns the validated, immutable [`Model`].
    pub fn build(self) -> Model {
        Model {
            factory_ids: self.factory_ids,
            factory_countries: self.factory_countries,
            factory_capacities: self.factory_capacities,
            country_ids: self.country_ids,
            country_export_limits: self.country_export_limits,
            country_import_quotas: self.country_import_quotas,
            country_child_counts: self.country_child_counts,
            child_ids: self.child_ids,
            child_countries: self.child_countries,
            child_requests: self.child_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_country_builder() -> ModelBuilder {
        let mut builder = ModelBuilder::new();
        builder.add_country(1, 10, 0).unwrap();
        builder.add_country(2, 0, 1).unwrap();
        builder
    }

    #[test]
    fn test_build_and_accessors() {
        let mut builder = two_country_builder();
        let f1 = builder.add_factory(1, 1, 5).unwrap();
        let f2 = builder.add_factory(9, 2, 0).unwrap();
        let k1 = builder.add_child(4, 2, &[1, 9]).unwrap();
        let model = builder.build();

        assert_eq!(model.num_factories(), 2);
        assert_eq!(model.num_countries(), 2);
        assert_eq!(model.num_children(), 1);

        assert_eq!(model.factory_capacity(f1), 5);
        assert_eq!(model.factory_capacity(f2), 0);
        assert_eq!(model.factory_country(f2), CountryIndex::new(1));
        assert_eq!(model.factory_id(f2), 9);

        assert_eq!(model.export_limit(CountryIndex::new(0)), 10);
        assert_eq!(model.import_quota(CountryIndex::new(1)), 1);
        assert_eq!(model.children_in_country(CountryIndex::new(0)), 0);
        assert_eq!(model.children_in_country(CountryIndex::new(1)), 1);

        assert_eq!(model.child_id(k1), 4);
        assert_eq!(model.child_country(k1), CountryIndex::new(1));
        assert_eq!(model.child_requests(k1), &[f1, f2]);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut builder = two_country_builder();
        assert_eq!(
            builder.add_country(1, 0, 0),
            Err(ModelBuildError::DuplicateCountryId(1))
        );

        builder.add_factory(3, 1, 1).unwrap();
        assert_eq!(
            builder.add_factory(3, 2, 1),
            Err(ModelBuildError::DuplicateFactoryId(3))
        );

        builder.add_child(5, 1, &[3]).unwrap();
        assert_eq!(
            builder.add_child(5, 2, &[3]),
            Err(ModelBuildError::DuplicateChildId(5))
        );
    }

    #[test]
    fn test_rejected_duplicates_leave_builder_intact() {
        // A rejected duplicate must not disturb the id maps: later calls
        // resolving the same ids still reach the original entities.
        let mut builder = two_country_builder();
        assert_eq!(
            builder.add_country(1, 99, 99),
            Err(ModelBuildError::DuplicateCountryId(1))
        );

        let f = builder.add_factory(3, 1, 4).unwrap();
        assert_eq!(
            builder.add_factory(3, 2, 7),
            Err(ModelBuildError::DuplicateFactoryId(3))
        );

        let k = builder.add_child(5, 1, &[3]).unwrap();
        assert_eq!(
            builder.add_child(5, 2, &[3]),
            Err(ModelBuildError::DuplicateChildId(5))
        );
        builder.add_child(6, 1, &[3]).unwrap();

        let model = builder.build();
        assert_eq!(model.export_limit(CountryIndex::new(0)), 10);
        assert_eq!(model.factory_country(f), CountryIndex::new(0));
        assert_eq!(model.factory_capacity(f), 4);
        assert_eq!(model.child_country(k), CountryIndex::new(0));
        assert_eq!(model.children_in_country(CountryIndex::new(0)), 2);
    }

    #[test]
    fn test_unknown_references_are_rejected() {
        let mut builder = two_country_builder();
        assert_eq!(
            builder.add_factory(1, 99, 1),
            Err(ModelBuildError::UnknownCountry { country_id: 99 })
        );

        builder.add_factory(1, 1, 1).unwrap();
        assert_eq!(
            builder.add_child(4, 1, &[1, 2]),
            Err(ModelBuildError::UnknownFactory {
                child_id: 4,
                factory_id: 2
            })
        );
    }

    #[test]
    fn test_empty_wish_list_is_rejected() {
        let mut builder = two_country_builder();
        assert_eq!(
            builder.add_child(4, 1, &[]),
            Err(ModelBuildError::EmptyWishList { child_id: 4 })
        );
    }

    #[test]
    fn test_duplicate_wishes_are_deduplicated() {
        let mut builder = two_country_builder();
        let f = builder.add_factory(1, 1, 1).unwrap();
        let k = builder.add_child(4, 1, &[1, 1, 1]).unwrap();
        let model = builder.build();
        assert_eq!(model.child_requests(k), &[f]);
    }

    #[test]
    fn test_display_summarizes_dimensions() {
        let mut builder = two_country_builder();
        builder.add_factory(1, 1, 1).unwrap();
        let model = builder.build();
        assert_eq!(
            format!("{}", model),
            "Model(num_factories: 1, num_countries: 2, num_children: 0)"
        );
    }
}
