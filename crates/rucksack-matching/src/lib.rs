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

//! # Rucksack Matching
//!
//! Incremental maximum-matching maintenance for one weight class at a time.
//!
//! Every weight class induces a bipartite graph between its items and
//! per-knapsack capacity *slots* (one slot per unit of "room for one more
//! item of this class here"). Because every slot of a knapsack is adjacent
//! to exactly the items eligible for that knapsack, the graph splits into a
//! static part — the eligibility adjacency, built once per solve
//! ([`graph::ClassGraph`]) — and a small mutable part: the active slot
//! counts and the matching itself ([`state::MatchingState`]). Cloning a
//! state is a plain structural copy of a few index vectors, which is what
//! makes clone-per-branch search affordable.
//!
//! The maintenance primitives:
//!
//! * [`augment`] — move exactly one matched unit into or out of a knapsack
//!   via constrained alternating-path search, keeping the class total and
//!   all knapsacks up to the branching cursor untouched;
//! * [`maximize`] — Hopcroft–Karp phase search bringing a matching to
//!   maximum after structural changes;
//! * [`adjust`] — reconcile a state to new capacity limits (evict, re-seat
//!   locally, extend, then re-maximize), cascading capacity consumption to
//!   the next class.

pub mod adjust;
pub mod augment;
pub mod graph;
pub mod maximize;
pub mod state;
