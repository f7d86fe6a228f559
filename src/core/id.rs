//! Types used for identifying vertices and edges in graphs.
//!
//! Identifiers are opaque to the algorithms. Every id type must have a
//! representation for a "[sentinel]" value that is conceptually `None` without
//! the overhead of `Option`. Passing a sentinel id to a query is always an
//! error that the algorithms report instead of panicking.
//!
//! [sentinel]: https://en.wikipedia.org/wiki/Sentinel_value

use std::{fmt::Debug, hash::Hash};

/// A unique identification of a vertex or edge in a graph.
pub trait IdType: Clone + Eq + Hash + Debug {
    /// Conceptually `None` in `Option<ID>`, but without using `Option`.
    fn sentinel() -> Self;

    /// Returns `true` if the id is the [sentinel](IdType::sentinel) value.
    fn is_sentinel(&self) -> bool;
}

macro_rules! impl_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(bits: u64) -> Self {
                Self(bits)
            }

            pub const fn to_bits(self) -> u64 {
                self.0
            }

            pub const fn from_usize(value: usize) -> Self {
                Self(value as u64)
            }

            pub const fn as_usize(&self) -> usize {
                self.0 as usize
            }
        }

        impl IdType for $name {
            fn sentinel() -> Self {
                Self(u64::MAX)
            }

            fn is_sentinel(&self) -> bool {
                self.0 == u64::MAX
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                Self::from_usize(value)
            }
        }

        impl From<u64> for $name {
            fn from(bits: u64) -> Self {
                Self(bits)
            }
        }
    };
}

impl_id!(VertexId);
impl_id!(EdgeId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_not_an_ordinary_id() {
        assert!(VertexId::sentinel().is_sentinel());
        assert!(!VertexId::from(0usize).is_sentinel());
        assert_ne!(VertexId::sentinel(), VertexId::from(0usize));
    }

    #[test]
    fn usize_round_trip() {
        let id = EdgeId::from(42usize);
        assert_eq!(id.as_usize(), 42);
    }
}
