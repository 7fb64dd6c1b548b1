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

use crate::index::{ItemIndex, KnapsackIndex};

/// The solution to a restricted multiple-knapsack instance.
///
/// Structure-of-arrays layout: index `i` holds the placement of item `i`
/// (`None` when the item was left out). The value equals the number of
/// placed items, since the engine requires unit profits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    value: usize,
    placements: Vec<Option<KnapsackIndex>>,
}

impl Assignment {
    /// Constructs a new `Assignment`.
    ///
    /// # Panics
    ///
    /// Panics if `value` differs from the number of placed items.
    pub fn new(value: usize, placements: Vec<Option<KnapsackIndex>>) -> Self {
        let placed = placements.iter().filter(|p| p.is_some()).count();
        assert_eq!(
            value, placed,
            "called `Assignment::new` with inconsistent value: {} declared but {} items placed",
            value, placed
        );
        Self { value, placements }
    }

    /// Returns the solution value (number of placed items).
    #[inline]
    pub fn value(&self) -> usize {
        self.value
    }

    /// Returns the number of items this assignment covers, placed or not.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.placements.len()
    }

    /// Returns the knapsack holding the given item, if any.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of bounds.
    #[inline]
    pub fn knapsack_for_item(&self, item: ItemIndex) -> Option<KnapsackIndex> {
        self.placements[item.get()]
    }

    /// Returns the raw placement slice.
    #[inline]
    pub fn placements(&self) -> &[Option<KnapsackIndex>] {
        &self.placements
    }

    /// Returns the items placed into the given knapsack, in item order.
    pub fn items_for_knapsack(&self, knapsack: KnapsackIndex) -> Vec<ItemIndex> {
        self.placements
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == Some(knapsack))
            .map(|(i, _)| ItemIndex::new(i))
            .collect()
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Assignment Summary")?;
        writeln!(f, "   Value: {}", self.value)?;
        writeln!(f)?;

        if self.placements.is_empty() {
            writeln!(f, "   (No items)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Item", "Knapsack")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (i, placement) in self.placements.iter().enumerate() {
            match placement {
                Some(k) => writeln!(f, "   {:<10} | {:<10}", i, k.get())?,
                None => writeln!(f, "   {:<10} | {:<10}", i, "-")?,
            }
        }

        Ok(())
    }
}
