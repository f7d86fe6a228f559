//! Single-source path search on a shared relaxation core.
//!
//! All algorithms in this module compute paths from one root vertex by
//! [relaxation](Relaxation::relax): testing whether a candidate path through
//! an edge improves the best known cost of the edge's target and recording
//! the improvement if so. What distinguishes the algorithms is only the order
//! in which they feed edges to the shared core:
//!
//! * [`Dijkstra`] expands vertices closest-first from a priority queue and
//!   requires nonnegative weights,
//! * [`AStar`] does the same with the queue priority biased by a heuristic,
//! * [`BellmanFord`] sweeps all edges up to |V| - 1 times, handles negative
//!   weights and detects cycles that prevent the costs from stabilizing,
//! * [`DagShortestPaths`] relaxes each edge exactly once in topological
//!   order, which works for any weights but only on acyclic graphs.
//!
//! What "best" means is decided by the [`Relaxer`]: the default compares
//! costs as smaller-is-better with addition as the extension, the
//! [`Longest`](Relaxer::Longest) variant flips the preference and custom
//! combine/compare pairs are possible where the algorithm admits them.
//!
//! An algorithm instance is configured, run once, and then queried through
//! the capability traits [`Distances`], [`VertexColors`] and [`PathTree`]
//! (import the [prelude](crate::prelude) to have them in scope). Querying
//! before the run reports [`QueryError::NotYetComputed`] instead of
//! panicking.
//!
//! # Examples
//!
//! ```
//! use wayfind::{algo::Dijkstra, core::marker::Undirected, prelude::*, storage::AdjList};
//!
//! let mut graph = AdjList::<_, u32, Undirected>::new();
//!
//! let prague = graph.add_vertex("Prague");
//! let bratislava = graph.add_vertex("Bratislava");
//! let vienna = graph.add_vertex("Vienna");
//! let munich = graph.add_vertex("Munich");
//!
//! graph.add_edge(&prague, &bratislava, 328);
//! graph.add_edge(&prague, &vienna, 293);
//! graph.add_edge(&bratislava, &vienna, 79);
//! graph.add_edge(&vienna, &munich, 402);
//!
//! let mut search = Dijkstra::on(&graph);
//! search.run(prague).unwrap();
//!
//! assert_eq!(search.dist(&munich), Ok(&695));
//!
//! let through = search
//!     .try_path(&munich)
//!     .unwrap()
//!     .len();
//! assert_eq!(through, 2);
//! ```

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use thiserror::Error;

use crate::{
    core::{id::IdType, weight::Weight, GraphBase},
    visit::Color,
};

mod astar;
mod bellman_ford;
mod dag;
mod dijkstra;
mod relaxation;
mod relaxer;

pub use astar::AStar;
pub use bellman_ford::BellmanFord;
pub use dag::DagShortestPaths;
pub use dijkstra::Dijkstra;
pub use relaxation::{KnownDists, Relaxation};
pub use relaxer::{CustomRelaxer, Relaxer};

/// The error encountered during a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The root vertex does not exist in the graph.
    #[error("root vertex does not exist")]
    RootAbsent,

    /// An edge with negative weight encountered by an algorithm that
    /// requires nonnegative weights.
    #[error("edge with negative weight encountered")]
    NegativeWeight,

    /// The costs cannot stabilize because a cycle keeps improving them. For
    /// the default relaxer this is a negative cycle.
    #[error("negative cycle encountered")]
    NegativeCycle,

    /// The graph passed to an algorithm that requires acyclic input contains
    /// a cycle.
    #[error("graph contains cycle")]
    Cycle,

    /// The specified goal not reached.
    #[error("specified goal not reached")]
    GoalNotReached,

    /// A vertex reported by the graph is not available.
    ///
    /// This error should not happen in normal circumstances. If it does, it
    /// indicates a bad implementation of the graph.
    #[error("vertex not available")]
    VertexNotAvailable,

    /// An edge reported by the graph is not available.
    ///
    /// This error should not happen in normal circumstances. If it does, it
    /// indicates a bad implementation of the graph.
    #[error("edge not available")]
    EdgeNotAvailable,

    /// The instance has already performed its run. Results of the first run
    /// remain available; construct a new instance to search again.
    #[error("algorithm instance has already computed its result")]
    AlreadyComputed,

    /// The run was stopped through its [`Interrupt`] handle. The state
    /// recorded so far stays available and consistent.
    #[error("run was interrupted")]
    Interrupted,
}

/// The error reported by result queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The vertex argument is the sentinel value. Reported regardless of the
    /// run state.
    #[error("vertex id is the sentinel value")]
    InvalidVertex,

    /// No run has produced results yet. Distinct from
    /// [NotFound](QueryError::NotFound) so that "never ran" and "ran but
    /// unreachable" cannot be confused.
    #[error("no results have been computed yet")]
    NotYetComputed,

    /// Nothing is recorded for the vertex. Either no path reached it or it
    /// was never part of the searched graph; the two cases are not
    /// distinguishable through the recorded state.
    #[error("vertex has no recorded state")]
    NotFound,
}

/// An edge that became part of the search tree, carried by tree-edge
/// notifications and the predecessor relation.
pub struct TreeEdge<G: GraphBase> {
    pub edge: G::EdgeId,
    pub source: G::VertexId,
    pub target: G::VertexId,
}

impl<G: GraphBase> Clone for TreeEdge<G> {
    fn clone(&self) -> Self {
        Self {
            edge: self.edge.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }
}

impl<G: GraphBase> fmt::Debug for TreeEdge<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeEdge")
            .field("edge", &self.edge)
            .field("source", &self.source)
            .field("target", &self.target)
            .finish()
    }
}

impl<G: GraphBase> PartialEq for TreeEdge<G> {
    fn eq(&self, other: &Self) -> bool {
        self.edge == other.edge && self.source == other.source && self.target == other.target
    }
}

impl<G: GraphBase> Eq for TreeEdge<G> {}

/// Cooperative stop signal for a running search.
///
/// The handle can be cloned and triggered from anywhere, typically from
/// another thread watching a deadline. The running algorithm checks it
/// between relaxation steps and winds down with [`Error::Interrupted`],
/// leaving the state recorded so far consistent: distances already written
/// are valid costs of real paths, just not necessarily optimal ones.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Composition seam between a concrete algorithm and the shared core.
///
/// An algorithm implements this single method and receives the whole query
/// surface ([`Distances`], [`VertexColors`], [`PathTree`]) through blanket
/// implementations. `None` means no run has published results yet.
pub trait Search<W, G: GraphBase> {
    fn relaxation(&self) -> Option<&Relaxation<W, G>>;
}

/// Query access to the distances recorded by a completed run.
///
/// The weight type parameter ties the trait to one search instance; it is
/// inferred and never needs to be spelled out.
pub trait Distances<W, G: GraphBase> {
    /// Returns the recorded distance of a vertex, or `None` if nothing is
    /// recorded for it.
    ///
    /// Whether an unreached vertex has no recorded distance or an "unreached"
    /// (infinite) one depends on the algorithm: those that register the whole
    /// vertex set up front report the latter.
    fn try_dist<'a>(&'a self, to: &G::VertexId) -> Result<Option<&'a W>, QueryError>
    where
        G: 'a;

    /// Returns the recorded distance of a vertex, reporting
    /// [NotFound](QueryError::NotFound) where
    /// [try_dist](Distances::try_dist) would return `None`.
    fn dist<'a>(&'a self, to: &G::VertexId) -> Result<&'a W, QueryError>
    where
        G: 'a;

    /// Iterates over every vertex with a recorded distance, discovered and
    /// preregistered ones alike.
    fn known_dists<'a>(&'a self) -> Result<KnownDists<'a, W, G>, QueryError>
    where
        G: 'a;
}

/// Query access to the traversal status recorded by a completed run.
pub trait VertexColors<W, G: GraphBase> {
    /// Returns the color of a vertex. A vertex that was never registered by
    /// the run reports [NotFound](QueryError::NotFound), which is distinct
    /// from a registered but unvisited (White) vertex.
    fn color(&self, vertex: &G::VertexId) -> Result<Color, QueryError>;
}

/// Query access to the tree of paths recorded by a completed run.
pub trait PathTree<W, G: GraphBase> {
    /// The root vertex the search was run from.
    fn root<'a>(&'a self) -> Result<&'a G::VertexId, QueryError>
    where
        G: 'a,
        W: 'a;

    /// Reconstructs the edges of the path from the root to `to`, in that
    /// order. Reports [NotFound](QueryError::NotFound) when no recorded path
    /// reaches the vertex.
    fn try_path(&self, to: &G::VertexId) -> Result<Vec<G::EdgeId>, QueryError>;
}

impl<A, W, G> Distances<W, G> for A
where
    A: Search<W, G>,
    W: Weight,
    G: GraphBase,
{
    fn try_dist<'a>(&'a self, to: &G::VertexId) -> Result<Option<&'a W>, QueryError>
    where
        G: 'a,
    {
        if to.is_sentinel() {
            return Err(QueryError::InvalidVertex);
        }

        let relaxation = self.relaxation().ok_or(QueryError::NotYetComputed)?;
        Ok(relaxation.try_dist(to))
    }

    fn dist<'a>(&'a self, to: &G::VertexId) -> Result<&'a W, QueryError>
    where
        G: 'a,
    {
        self.try_dist(to)?.ok_or(QueryError::NotFound)
    }

    fn known_dists<'a>(&'a self) -> Result<KnownDists<'a, W, G>, QueryError>
    where
        G: 'a,
    {
        Ok(self
            .relaxation()
            .ok_or(QueryError::NotYetComputed)?
            .known_dists())
    }
}

impl<A, W, G> VertexColors<W, G> for A
where
    A: Search<W, G>,
    W: Weight,
    G: GraphBase,
{
    fn color(&self, vertex: &G::VertexId) -> Result<Color, QueryError> {
        if vertex.is_sentinel() {
            return Err(QueryError::InvalidVertex);
        }

        let relaxation = self.relaxation().ok_or(QueryError::NotYetComputed)?;
        relaxation.color(vertex).ok_or(QueryError::NotFound)
    }
}

impl<A, W, G> PathTree<W, G> for A
where
    A: Search<W, G>,
    W: Weight,
    G: GraphBase,
{
    fn root<'a>(&'a self) -> Result<&'a G::VertexId, QueryError>
    where
        G: 'a,
        W: 'a,
    {
        Ok(self.relaxation().ok_or(QueryError::NotYetComputed)?.root())
    }

    fn try_path(&self, to: &G::VertexId) -> Result<Vec<G::EdgeId>, QueryError> {
        if to.is_sentinel() {
            return Err(QueryError::InvalidVertex);
        }

        let relaxation = self.relaxation().ok_or(QueryError::NotYetComputed)?;
        relaxation.path_to(to).ok_or(QueryError::NotFound)
    }
}
