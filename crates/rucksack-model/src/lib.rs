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

//! # Rucksack Model
//!
//! **The Core Domain Model for the Rucksack Multiple-Knapsack Solver.**
//!
//! This crate defines the data structures describing the **Multiple Knapsack
//! Problem with Assignment Restrictions**: capacity-limited knapsacks, items
//! grouped into weight classes, and the per-item eligibility relation that
//! restricts which knapsacks an item may enter. It is the data interchange
//! layer between problem definition (user input) and the solving engine
//! (`rucksack_bnb`).
//!
//! ## Architecture
//!
//! The crate separates **construction** from **solving**:
//!
//! * **`index`**: strongly-typed wrappers (`KnapsackIndex`, `ItemIndex`,
//!   `ClassIndex`) preventing logical indexing errors.
//! * **`instance`**: the `Instance` (immutable, canonically ordered,
//!   optimized for solving) and `InstanceBuilder` (mutable, validating,
//!   optimized for configuration). Weight classes are deduplicated through
//!   an explicit registry keyed by `(profit, weight)`, so two classes with
//!   equal profit and weight are the same class.
//! * **`assignment`**: the output format — the solution value and the
//!   item-to-knapsack placement.
//!
//! ## Design Philosophy
//!
//! 1. **Type Safety**: indices are distinct types; a `ClassIndex` cannot
//!    address a knapsack.
//! 2. **Canonical Order**: `build()` sorts knapsacks ascending by capacity
//!    and classes ascending by weight once; the engine relies on this order
//!    for branching and never re-sorts.
//! 3. **Fail-Fast**: the builder validates every input eagerly so the
//!    solver never encounters an invalid instance.

pub mod assignment;
pub mod err;
pub mod index;
pub mod instance;
