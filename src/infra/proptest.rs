//! [proptest](https://docs.rs/proptest) strategies generating random graphs.
//!
//! The strategies produce [`AdjList`] graphs with unit vertex attributes and
//! caller-supplied edge attributes. Shrinking works on the generated vertex
//! count and edge list, which in practice reduces failing cases well even
//! without a graph-aware shrinker.

use std::fmt::Debug;

use proptest::{collection, prelude::*};

use crate::{
    core::marker::{Directed, EdgeType, Undirected},
    storage::AdjList,
};

/// Strategy for graphs with up to `max_size` vertices and roughly twice as
/// many edges, with edge attributes drawn from `edge`.
pub fn graph<Ty, S>(edge: S, max_size: usize) -> impl Strategy<Value = AdjList<(), S::Value, Ty>>
where
    Ty: EdgeType + Debug,
    S: Strategy + Clone,
{
    (1..=max_size).prop_flat_map(move |vertex_count| {
        let edges = collection::vec(
            (0..vertex_count, 0..vertex_count, edge.clone()),
            0..=2 * vertex_count,
        );

        edges.prop_map(move |edges| {
            let mut graph = AdjList::new();
            let vertices: Vec<_> = (0..vertex_count).map(|_| graph.add_vertex(())).collect();

            for (from, to, attr) in edges {
                graph.add_edge(&vertices[from], &vertices[to], attr);
            }

            graph
        })
    })
}

pub fn graph_directed<S>(
    edge: S,
    max_size: usize,
) -> impl Strategy<Value = AdjList<(), S::Value, Directed>>
where
    S: Strategy + Clone,
{
    graph::<Directed, S>(edge, max_size)
}

pub fn graph_undirected<S>(
    edge: S,
    max_size: usize,
) -> impl Strategy<Value = AdjList<(), S::Value, Undirected>>
where
    S: Strategy + Clone,
{
    graph::<Undirected, S>(edge, max_size)
}
