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

//! # Sleigh ILP
//!
//! A small, engine-agnostic integer linear program layer: binary decision
//! variables addressed by opaque [`var::VarId`] handles, integer-coefficient
//! linear constraints, and a single maximization objective.
//!
//! The [`backend::IlpBackend`] trait is the boundary to the external solving
//! engine. The rest of the workspace describes *what* to solve through
//! [`problem::IlpProblem`] and never depends on engine internals; the
//! default [`backend::GoodLpBackend`] maps the problem onto `good_lp` with
//! the pure-Rust `microlp` solver.
//!
//! Variables are identified by handles, never by names. Handles are dense
//! positions assigned by the caller, so a solution is just one `Vec<bool>`
//! indexed the same way.

pub mod backend;
pub mod outcome;
pub mod problem;
pub mod var;
