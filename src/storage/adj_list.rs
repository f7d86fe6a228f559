use std::{marker::PhantomData, ops::Range, slice};

use crate::core::{
    id::{EdgeId, VertexId},
    marker::{Direction, EdgeType},
    GraphBase, GraphRef, NeighborRef, Neighbors, NoSuchVertexError, EdgeSet, VertexSet,
};

/// Adjacency list graph storage.
///
/// Kept intentionally small: vertices and edges can be added and edge
/// attributes replaced, nothing can be removed. That is all the algorithms
/// in this crate and their tests need from a storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjList<V, E, Ty> {
    vertices: Vec<Slot<V>>,
    edges: Vec<E>,
    endpoints: Vec<[VertexId; 2]>,
    ty: PhantomData<fn() -> Ty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot<V> {
    attr: V,
    // Outgoing and incoming edge lists. Undirected graphs use only the first
    // one, for both endpoints.
    edges: [Vec<EdgeId>; 2],
}

impl<V, E, Ty: EdgeType> AdjList<V, E, Ty> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            endpoints: Vec::new(),
            ty: PhantomData,
        }
    }

    pub fn add_vertex(&mut self, attr: V) -> VertexId {
        let id = VertexId::from_usize(self.vertices.len());
        self.vertices.push(Slot {
            attr,
            edges: [Vec::new(), Vec::new()],
        });
        id
    }

    pub fn try_add_edge(
        &mut self,
        from: &VertexId,
        to: &VertexId,
        attr: E,
    ) -> Result<EdgeId, NoSuchVertexError> {
        if from.as_usize() >= self.vertices.len() || to.as_usize() >= self.vertices.len() {
            return Err(NoSuchVertexError);
        }

        let id = EdgeId::from_usize(self.edges.len());
        self.edges.push(attr);
        self.endpoints.push([*from, *to]);

        if Ty::is_directed() {
            self.vertices[from.as_usize()].edges[0].push(id);
            self.vertices[to.as_usize()].edges[1].push(id);
        } else {
            self.vertices[from.as_usize()].edges[0].push(id);
            // A self-loop is stored once.
            if from != to {
                self.vertices[to.as_usize()].edges[0].push(id);
            }
        }

        Ok(id)
    }

    /// # Panics
    ///
    /// Panics if an endpoint does not exist. Use
    /// [try_add_edge](AdjList::try_add_edge) to handle the failure instead.
    pub fn add_edge(&mut self, from: &VertexId, to: &VertexId, attr: E) -> EdgeId {
        match self.try_add_edge(from, to, attr) {
            Ok(id) => id,
            Err(error) => panic!("{error}"),
        }
    }

    /// Replaces the attribute of an edge, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics if the edge does not exist.
    pub fn replace_edge(&mut self, id: &EdgeId, attr: E) -> E {
        let slot = self
            .edges
            .get_mut(id.as_usize())
            .expect("edge does not exist");
        std::mem::replace(slot, attr)
    }
}

impl<V, E, Ty: EdgeType> Default for AdjList<V, E, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, Ty: EdgeType> GraphBase for AdjList<V, E, Ty> {
    type VertexId = VertexId;
    type EdgeId = EdgeId;
    type EdgeType = Ty;

    fn vertex_count_hint(&self) -> Option<usize> {
        Some(self.vertices.len())
    }
}

impl<V, E, Ty: EdgeType> Neighbors for AdjList<V, E, Ty> {
    type NeighborsIter<'a>
        = NeighborsIter<'a>
    where
        Self: 'a;

    fn neighbors_directed(
        &self,
        from: &VertexId,
        dir: Direction,
    ) -> Result<NeighborsIter<'_>, NoSuchVertexError> {
        let slot = self
            .vertices
            .get(from.as_usize())
            .ok_or(NoSuchVertexError)?;

        let index = if Ty::is_directed() { dir.index() } else { 0 };

        Ok(NeighborsIter {
            edges: slot.edges[index].iter(),
            endpoints: &self.endpoints,
            from: *from,
            dir,
        })
    }
}

#[derive(Debug)]
pub struct NeighborsIter<'a> {
    edges: slice::Iter<'a, EdgeId>,
    endpoints: &'a [[VertexId; 2]],
    from: VertexId,
    dir: Direction,
}

impl<'a> Iterator for NeighborsIter<'a> {
    type Item = NeighborRef<VertexId, EdgeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = *self.edges.next()?;
        let [u, v] = self.endpoints[edge.as_usize()];

        // The edge is incident to `from`, so the neighbor is whichever
        // endpoint `from` is not (or `from` itself for a self-loop).
        let id = if u == self.from { v } else { u };

        Some(NeighborRef {
            id,
            edge,
            pred: self.from,
            dir: self.dir,
        })
    }
}

impl<V, E, Ty: EdgeType> VertexSet for AdjList<V, E, Ty> {
    type VerticesByIdIter<'a>
        = RangeIds<VertexId>
    where
        Self: 'a;

    fn vertices_by_id(&self) -> RangeIds<VertexId> {
        RangeIds::up_to(self.vertices.len())
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn contains_vertex(&self, id: &VertexId) -> bool {
        id.as_usize() < self.vertices.len()
    }
}

impl<V, E, Ty: EdgeType> EdgeSet for AdjList<V, E, Ty> {
    type EdgesByIdIter<'a>
        = RangeIds<EdgeId>
    where
        Self: 'a;

    fn edges_by_id(&self) -> RangeIds<EdgeId> {
        RangeIds::up_to(self.edges.len())
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn endpoints(&self, id: &EdgeId) -> Option<(VertexId, VertexId)> {
        self.endpoints
            .get(id.as_usize())
            .map(|&[from, to]| (from, to))
    }
}

impl<V, E, Ty: EdgeType> GraphRef<V, E> for AdjList<V, E, Ty> {
    fn vertex(&self, id: &VertexId) -> Option<&V> {
        self.vertices.get(id.as_usize()).map(|slot| &slot.attr)
    }

    fn edge(&self, id: &EdgeId) -> Option<&E> {
        self.edges.get(id.as_usize())
    }
}

/// Iterator over a contiguous range of ids.
pub struct RangeIds<I> {
    range: Range<u64>,
    ty: PhantomData<fn() -> I>,
}

impl<I> RangeIds<I> {
    fn up_to(len: usize) -> Self {
        Self {
            range: 0..len as u64,
            ty: PhantomData,
        }
    }
}

impl<I: From<u64>> Iterator for RangeIds<I> {
    type Item = I;

    fn next(&mut self) -> Option<I> {
        self.range.next().map(I::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::core::{
        id::IdType,
        marker::{Directed, Undirected},
    };

    #[test]
    fn directed_neighbors_respect_direction() {
        let mut graph = AdjList::<_, (), Directed>::new();

        let v0 = graph.add_vertex("a");
        let v1 = graph.add_vertex("b");
        let edge = graph.add_edge(&v0, &v1, ());

        let outgoing: Vec<_> = graph
            .neighbors_directed(&v0, Direction::Outgoing)
            .unwrap()
            .collect();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].id, v1);
        assert_eq!(outgoing[0].edge, edge);
        assert_eq!(outgoing[0].pred, v0);

        assert_eq!(
            graph
                .neighbors_directed(&v0, Direction::Incoming)
                .unwrap()
                .count(),
            0
        );
        assert_eq!(
            graph.degree_directed(&v1, Direction::Incoming).unwrap(),
            1
        );
    }

    #[test]
    fn undirected_neighbors_are_symmetric() {
        let mut graph = AdjList::<(), (), Undirected>::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        graph.add_edge(&v0, &v1, ());

        for dir in [Direction::Outgoing, Direction::Incoming] {
            let from_v1: Vec<_> = graph.neighbors_directed(&v1, dir).unwrap().collect();
            assert_eq!(from_v1.len(), 1);
            assert_eq!(from_v1[0].id, v0);
        }
    }

    #[test]
    fn missing_vertex_is_an_error_not_an_empty_list() {
        let mut graph = AdjList::<(), (), Directed>::new();
        let v0 = graph.add_vertex(());

        assert!(graph
            .neighbors_directed(&v0, Direction::Outgoing)
            .unwrap()
            .next()
            .is_none());

        assert_matches!(
            graph.neighbors_directed(&VertexId::from(7usize), Direction::Outgoing),
            Err(NoSuchVertexError)
        );
        assert_matches!(
            graph.neighbors_directed(&VertexId::sentinel(), Direction::Outgoing),
            Err(NoSuchVertexError)
        );
    }

    #[test]
    fn endpoints_and_attributes() {
        let mut graph = AdjList::<_, i32, Directed>::new();

        let v0 = graph.add_vertex("a");
        let v1 = graph.add_vertex("b");
        let edge = graph.add_edge(&v0, &v1, 7);

        assert_eq!(graph.endpoints(&edge), Some((v0, v1)));
        assert_eq!(graph.edge(&edge), Some(&7));
        assert_eq!(graph.vertex(&v0), Some(&"a"));

        let old = graph.replace_edge(&edge, -1);
        assert_eq!(old, 7);
        assert_eq!(graph.edge(&edge), Some(&-1));
    }

    #[test]
    fn id_enumeration() {
        let mut graph = AdjList::<(), (), Directed>::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        graph.add_edge(&v0, &v1, ());

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.vertices_by_id().collect::<Vec<_>>(),
            vec![v0, v1]
        );
        assert!(graph.contains_vertex(&v1));
        assert!(!graph.contains_vertex(&VertexId::from(2usize)));
    }

    #[test]
    fn try_add_edge_rejects_missing_endpoint() {
        let mut graph = AdjList::<(), (), Directed>::new();
        let v0 = graph.add_vertex(());

        assert_matches!(
            graph.try_add_edge(&v0, &VertexId::from(3usize), ()),
            Err(NoSuchVertexError)
        );
    }
}
