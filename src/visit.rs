//! State shared by graph traversals.
//!
//! Generic traversal drivers (breadth-first and depth-first visitors) are not
//! part of this crate. What lives here is the vocabulary those traversals and
//! the search algorithms in [`algo`](crate::algo) agree on.

/// Traversal status of a vertex.
///
/// Colors only move forward during a run: a vertex starts [White](Color::White),
/// becomes [Gray](Color::Gray) when it enters the frontier and
/// [Black](Color::Black) once it is finished. The transitions are enforced by
/// the search state, not by the individual algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Not visited yet.
    #[default]
    White,
    /// On the frontier, not finished.
    Gray,
    /// Finished.
    Black,
}
