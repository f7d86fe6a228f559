//! Capability traits through which algorithms query a graph.
//!
//! The traits are deliberately narrow. An algorithm asks for exactly the
//! capabilities it needs (neighbor enumeration, vertex set, edge set,
//! attribute access), and any storage that provides them can be used.
//!
//! Queries that take a vertex distinguish "the vertex has no neighbors" from
//! "there is no such vertex". The latter is reported as [`NoSuchVertexError`]
//! instead of a silently empty iterator.

use thiserror::Error;

use super::{
    id::IdType,
    marker::{Direction, EdgeType},
};

/// The vertex queried for does not exist in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("vertex does not exist")]
pub struct NoSuchVertexError;

pub trait GraphBase {
    type VertexId: IdType;
    type EdgeId: IdType;
    type EdgeType: EdgeType;

    fn is_directed(&self) -> bool {
        Self::EdgeType::is_directed()
    }

    // Upper bound, if known.
    fn vertex_count_hint(&self) -> Option<usize> {
        None
    }
}

/// An edge incident to a vertex, as seen from that vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRef<VI, EI> {
    /// The vertex on the other side of the edge.
    pub id: VI,
    pub edge: EI,
    /// The vertex from which the edge was traversed.
    pub pred: VI,
    pub dir: Direction,
}

pub trait Neighbors: GraphBase {
    type NeighborsIter<'a>: Iterator<Item = NeighborRef<Self::VertexId, Self::EdgeId>>
    where
        Self: 'a;

    fn neighbors_directed(
        &self,
        from: &Self::VertexId,
        dir: Direction,
    ) -> Result<Self::NeighborsIter<'_>, NoSuchVertexError>;

    fn degree_directed(
        &self,
        id: &Self::VertexId,
        dir: Direction,
    ) -> Result<usize, NoSuchVertexError> {
        Ok(self.neighbors_directed(id, dir)?.count())
    }
}

pub trait VertexSet: GraphBase {
    type VerticesByIdIter<'a>: Iterator<Item = Self::VertexId>
    where
        Self: 'a;

    fn vertices_by_id(&self) -> Self::VerticesByIdIter<'_>;

    fn vertex_count(&self) -> usize {
        self.vertices_by_id().count()
    }

    fn contains_vertex(&self, id: &Self::VertexId) -> bool {
        self.vertices_by_id().any(|v| &v == id)
    }
}

pub trait EdgeSet: GraphBase {
    type EdgesByIdIter<'a>: Iterator<Item = Self::EdgeId>
    where
        Self: 'a;

    fn edges_by_id(&self) -> Self::EdgesByIdIter<'_>;

    fn edge_count(&self) -> usize {
        self.edges_by_id().count()
    }

    fn endpoints(&self, id: &Self::EdgeId) -> Option<(Self::VertexId, Self::VertexId)>;
}

/// Read access to vertex and edge attributes.
pub trait GraphRef<V, E>: GraphBase {
    fn vertex(&self, id: &Self::VertexId) -> Option<&V>;
    fn edge(&self, id: &Self::EdgeId) -> Option<&E>;
}
