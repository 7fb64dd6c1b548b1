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

//! # Strongly Typed Indices
//!
//! A knapsack instance juggles three index spaces at once — knapsacks,
//! items, and weight classes — and raw `usize` values invite silent swaps
//! between them. `TypedIndex<T>` wraps a `usize` in a phantom tag type so
//! the compiler rejects such mix-ups, while `#[repr(transparent)]` keeps
//! the wrapper free at runtime.
//!
//! ```rust
//! use rucksack_core::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct KnapsackTag;
//! impl TypedIndexTag for KnapsackTag { const NAME: &'static str = "KnapsackIndex"; }
//!
//! type KnapsackIndex = TypedIndex<KnapsackTag>;
//! let k = KnapsackIndex::new(2);
//! assert_eq!(k.get(), 2);
//! assert_eq!(format!("{}", k), "KnapsackIndex(2)");
//! ```

/// Tags a typed index with a human-readable name used by `Debug`/`Display`.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index bound to a specific tag type `T`.
///
/// Two `TypedIndex` values with different tags are different types and
/// cannot be compared or substituted for one another.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps the given raw index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the raw `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIdx";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_get_and_conversions() {
        let idx = TestIndex::new(7);
        assert_eq!(idx.get(), 7);

        let from_usize: TestIndex = 3.into();
        assert_eq!(from_usize.get(), 3);

        let back: usize = idx.into();
        assert_eq!(back, 7);
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        let a = TestIndex::new(1);
        let b = TestIndex::new(4);
        assert!(a < b);
        assert_eq!(a, TestIndex::new(1));
    }

    #[test]
    fn test_display_uses_tag_name() {
        let idx = TestIndex::new(9);
        assert_eq!(format!("{}", idx), "TestIdx(9)");
        assert_eq!(format!("{:?}", idx), "TestIdx(9)");
    }
}
