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

//! Structural feasibility checks that run before any constraint is built.
//!
//! A country's minimum import quota demands that at least `min_import`
//! of its children receive a toy; since a child receives at most one toy,
//! a quota exceeding the country's child count can never be met, no
//! matter how the stock is distributed. Catching this on the model alone
//! skips variable layout, assembly, and the engine call entirely.

use sleigh_model::{index::CountryIndex, model::Model};

/// Returns the first country whose minimum import quota exceeds the
/// number of children registered in it, or `None` if no such country
/// exists.
pub fn impossible_import_quota(model: &Model) -> Option<CountryIndex> {
    (0..model.num_countries()).map(CountryIndex::new).find(|&j| {
        model.import_quota(j) > model.children_in_country(j)
    })
}
