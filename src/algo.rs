pub mod shortest_paths;

pub use shortest_paths::{AStar, BellmanFord, DagShortestPaths, Dijkstra};
