//! Supporting machinery that is not part of the graph model itself.

#[cfg(feature = "proptest")]
pub mod proptest;
