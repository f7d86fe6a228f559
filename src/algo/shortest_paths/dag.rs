use rustc_hash::FxHashMap;

use crate::core::{
    marker::{Directed, Direction},
    weight::{GetWeight, Identity, Weight},
    GraphBase, GraphRef, Neighbors, VertexSet,
};

use super::{
    relaxation::Relaxation, relaxer::Relaxer, Error, Interrupt, Search, TreeEdge,
};

/// Single-source paths on a [directed acyclic
/// graph](https://en.wikipedia.org/wiki/Directed_acyclic_graph), in a single
/// pass over the edges in topological order.
///
/// The vertices are processed in an order computed by [Kahn's
/// algorithm](https://en.wikipedia.org/wiki/Topological_sorting#Kahn's_algorithm),
/// which guarantees that when a vertex is expanded, no later edge can improve
/// it. Every vertex is therefore finished exactly once, negative weights need
/// no special handling and a cycle in the input is detected and reported as
/// [`Error::Cycle`].
///
/// With [`Relaxer::Longest`] the run computes longest paths (the critical
/// path of a dependency graph).
///
/// All graph vertices are registered up front, so after a successful run even
/// vertices that no path reaches have a recorded distance, namely the
/// relaxer's unreached cost.
pub struct DagShortestPaths<'a, W, G, F = Identity>
where
    G: GraphBase,
{
    graph: &'a G,
    edge_weight: F,
    relaxer: Relaxer<W>,
    interrupt: Option<Interrupt>,
    observers: Vec<Box<dyn FnMut(&TreeEdge<G>)>>,
    state: Option<Relaxation<W, G>>,
    ran: bool,
}

impl<'a, W, G> DagShortestPaths<'a, W, G>
where
    G: GraphBase,
{
    pub fn on(graph: &'a G) -> Self {
        Self {
            graph,
            edge_weight: Identity,
            relaxer: Relaxer::Shortest,
            interrupt: None,
            observers: Vec::new(),
            state: None,
            ran: false,
        }
    }
}

impl<'a, W, G, F> DagShortestPaths<'a, W, G, F>
where
    G: GraphBase,
{
    pub fn edge_weight<F2, V, E>(self, edge_weight: F2) -> DagShortestPaths<'a, W, G, F2>
    where
        G: GraphRef<V, E>,
        F2: GetWeight<E, W>,
        W: Weight,
    {
        DagShortestPaths {
            graph: self.graph,
            edge_weight,
            relaxer: self.relaxer,
            interrupt: self.interrupt,
            observers: self.observers,
            state: self.state,
            ran: self.ran,
        }
    }

    pub fn edge_weight_fn<F2, V, E>(self, edge_weight: F2) -> DagShortestPaths<'a, W, G, F2>
    where
        G: GraphRef<V, E>,
        F2: Fn(&E) -> W,
        W: Weight,
    {
        self.edge_weight(edge_weight)
    }

    /// Replaces the cost semantics of the search.
    pub fn relaxer(mut self, relaxer: Relaxer<W>) -> Self {
        self.relaxer = relaxer;
        self
    }

    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    /// Registers an observer notified for every edge added to the path tree,
    /// in relaxation order.
    pub fn on_tree_edge<O>(mut self, observer: O) -> Self
    where
        O: FnMut(&TreeEdge<G>) + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn run<V, E>(&mut self, root: G::VertexId) -> Result<(), Error>
    where
        G: GraphBase<EdgeType = Directed> + Neighbors + VertexSet + GraphRef<V, E>,
        F: GetWeight<E, W>,
        W: Weight,
    {
        if std::mem::replace(&mut self.ran, true) {
            return Err(Error::AlreadyComputed);
        }

        if !self.graph.contains_vertex(&root) {
            return Err(Error::RootAbsent);
        }

        let mut state = Relaxation::new(root, self.relaxer.clone());
        for observer in self.observers.drain(..) {
            state.subscribe_boxed(observer);
        }

        let mut in_deg: FxHashMap<G::VertexId, usize> = FxHashMap::default();
        // The order of processed vertices with in-degree zero does not
        // matter, a plain stack is enough.
        let mut queue = Vec::new();

        for vertex in self.graph.vertices_by_id() {
            state.preseed(vertex.clone());

            let deg = self
                .graph
                .degree_directed(&vertex, Direction::Incoming)
                .map_err(|_| Error::VertexNotAvailable)?;

            if deg == 0 {
                queue.push(vertex.clone());
            }
            in_deg.insert(vertex, deg);
        }

        let mut processed = 0;

        while let Some(vertex) = queue.pop() {
            if let Some(interrupt) = &self.interrupt {
                if interrupt.is_triggered() {
                    self.state = Some(state);
                    return Err(Error::Interrupted);
                }
            }

            processed += 1;

            let neighbors = self
                .graph
                .neighbors_directed(&vertex, Direction::Outgoing)
                .map_err(|_| Error::VertexNotAvailable)?;

            for neighbor in neighbors {
                let attr = self.graph.edge(&neighbor.edge).ok_or(Error::EdgeNotAvailable)?;
                let weight = self.edge_weight.get(attr);

                let target = neighbor.id.clone();
                state.relax(
                    TreeEdge {
                        edge: neighbor.edge,
                        source: vertex.clone(),
                        target: neighbor.id,
                    },
                    &weight,
                );

                let deg = in_deg
                    .get_mut(&target)
                    .ok_or(Error::VertexNotAvailable)?;
                *deg -= 1;
                if *deg == 0 {
                    queue.push(target);
                }
            }

            // Vertices that topological order visits before any path from the
            // root arrives stay White.
            if state.is_reached(&vertex) {
                state.finish(&vertex);
            }
        }

        // Vertices left unprocessed all have a positive in-degree, which
        // means they sit on or behind a cycle.
        if processed != in_deg.len() {
            return Err(Error::Cycle);
        }

        self.state = Some(state);
        Ok(())
    }
}

impl<'a, W, G, F> Search<W, G> for DagShortestPaths<'a, W, G, F>
where
    G: GraphBase,
{
    fn relaxation(&self) -> Option<&Relaxation<W, G>> {
        self.state.as_ref()
    }
}
