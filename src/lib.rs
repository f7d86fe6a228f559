//! Single-source path search on graphs, built around one shared relaxation
//! core with pluggable cost semantics.
//!
//! The algorithms ([Dijkstra](algo::Dijkstra), [A*](algo::AStar),
//! [Bellman-Ford](algo::BellmanFord),
//! [DAG paths](algo::DagShortestPaths)) differ only in the order in which
//! they feed candidate edges to the core; distance bookkeeping, vertex
//! coloring, the predecessor tree and tree-edge notifications are shared.
//! See [`algo::shortest_paths`] for the full story and an example.
//!
//! Graphs are consumed through narrow capability traits in [`core`], so any
//! storage implementing them can be searched. A minimal
//! [adjacency list](storage::AdjList) is included.

pub mod algo;
pub mod core;
pub mod infra;
pub mod storage;
pub mod visit;

pub mod prelude {
    #[doc(hidden)]
    pub use crate::algo::shortest_paths::{Distances, PathTree, VertexColors};
}
