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

//! # Sleigh Solver
//!
//! The planning pipeline for the toy allocation problem: from a validated
//! [`Model`](sleigh_model::model::Model) to the maximum number of children
//! that can receive a toy.
//!
//! ## Modules
//!
//! - `incidence`: the sparse variable layer, one decision variable per
//!   feasible (child, factory) pair, plus the grouped indices every
//!   constraint family iterates.
//! - `precheck`: structural feasibility checks that can prove an instance
//!   infeasible before any constraint is built.
//! - `assemble`: the constraint assembler and objective builder.
//! - `outcome`: the allocation, plan result, and statistics types.
//! - `planner`: the orchestrator tying the stages together and
//!   interpreting the engine's answer.
//!
//! ## Pipeline
//!
//! `precheck → incidence → assemble → solve → interpret`, strictly
//! sequential and deterministic; the only blocking call is the engine
//! solve behind the [`IlpBackend`](sleigh_ilp::backend::IlpBackend)
//! boundary. Every path terminates in exactly one
//! [`PlanOutcome`](outcome::PlanOutcome).

pub mod assemble;
pub mod incidence;
pub mod outcome;
pub mod planner;
pub mod precheck;
