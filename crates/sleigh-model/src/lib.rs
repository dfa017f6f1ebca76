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

//! # Sleigh Model
//!
//! **The Core Domain Model for the Sleigh Toy Allocation Planner.**
//!
//! This crate defines the data structures used to represent a toy allocation
//! instance: factories with finite stock, countries with export caps and
//! minimum import quotas, and children with wish-lists of acceptable
//! factories. It serves as the data interchange layer between problem input
//! (text instances) and the planning pipeline (`sleigh-solver`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **planning**:
//!
//! * **`index`**: Strongly-typed wrappers (`FactoryIndex`, `CountryIndex`,
//!   `ChildIndex`) to prevent logical indexing errors.
//! * **`model`**: The `Model` (immutable, dense, optimized for constraint
//!   assembly) and `ModelBuilder` (mutable, validating, owning the external
//!   id maps).
//! * **`loading`**: The `InstanceLoader`, turning line-oriented text
//!   instances into a validated `Model`.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally
//!     use a `ChildIndex` to look up a `Factory`.
//! 2.  **Memory Layout**: Data is stored in Structure of Arrays (SoA) form
//!     (parallel vectors per entity kind) so that the constraint assembler
//!     iterates dense slices rather than chasing per-entity allocations.
//! 3.  **Fail-Fast**: Builders and loaders validate inputs eagerly; a
//!     duplicate identifier or a reference to an unknown factory aborts the
//!     whole load, never producing a partially valid model.

pub mod index;
pub mod loading;
pub mod model;
