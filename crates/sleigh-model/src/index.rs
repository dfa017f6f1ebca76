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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Transparent wrappers around `usize` to prevent mixing dense positions
//! from different entity spaces (factories vs. countries vs. children).
//! Each wrapper compiles down to a plain `usize` (no runtime overhead)
//! while encoding intent at the type level.
//!
//! External identifiers from the input file are arbitrary integers and are
//! kept on the [`Model`](crate::model::Model) for diagnostics only; all
//! internal bookkeeping uses these dense indices.
//!
//! ## Usage
//!
//! ```rust
//! use sleigh_model::index::FactoryIndex;
//!
//! let f = FactoryIndex::new(3);
//! assert_eq!(f.get(), 3);
//! assert_eq!(format!("{}", f), "FactoryIndex(3)");
//! ```

macro_rules! typed_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Creates a new index from a dense position.
            #[inline(always)]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the underlying `usize` position.
            #[inline(always)]
            pub const fn get(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            fn from(index: $name) -> Self {
                index.0
            }
        }
    };
}

typed_index!(
    /// A typed index for factories.
    FactoryIndex
);

typed_index!(
    /// A typed index for countries.
    CountryIndex
);

typed_index!(
    /// A typed index for children.
    ChildIndex
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let f = FactoryIndex::new(10);
        assert_eq!(f.get(), 10);
    }

    #[test]
    fn test_conversions() {
        let c: CountryIndex = 42.into();
        assert_eq!(c.get(), 42);

        let raw: usize = c.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_debug_and_display() {
        let k = ChildIndex::new(7);
        assert_eq!(format!("{}", k), "ChildIndex(7)");
        assert_eq!(format!("{:?}", k), "ChildIndex(7)");
    }

    #[test]
    fn test_ordering_follows_position() {
        assert!(FactoryIndex::new(1) < FactoryIndex::new(2));
        assert_eq!(FactoryIndex::new(3), FactoryIndex::new(3));
    }
}
