use std::{cmp::Reverse, collections::BinaryHeap};

use crate::core::{
    marker::Direction,
    weight::{GetWeight, Identity, Weight, Weighted},
    GraphBase, GraphRef, Neighbors,
};

use super::{
    relaxation::Relaxation, relaxer::Relaxer, Error, Interrupt, Search, TreeEdge,
};

/// [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// for single-source shortest paths on graphs with nonnegative edge weights.
///
/// Vertices are expanded in order of their current distance from the root,
/// closest first, so every vertex is finished with its final distance the
/// first time it is popped from the queue. Works on directed and undirected
/// graphs alike, the difference being only in what the graph reports as
/// outgoing neighbors. A negative edge weight aborts the run with
/// [`Error::NegativeWeight`]; for weight types that cannot be negative the
/// check compiles away.
///
/// Vertices are discovered lazily. A vertex that no path from the root
/// reaches (or that was cut off by an early [goal](Dijkstra::goal)
/// termination) has no recorded distance.
pub struct Dijkstra<'a, W, G, F = Identity>
where
    G: GraphBase,
{
    graph: &'a G,
    edge_weight: F,
    goal: Option<G::VertexId>,
    interrupt: Option<Interrupt>,
    observers: Vec<Box<dyn FnMut(&TreeEdge<G>)>>,
    state: Option<Relaxation<W, G>>,
    ran: bool,
}

impl<'a, W, G> Dijkstra<'a, W, G>
where
    G: GraphBase,
{
    pub fn on(graph: &'a G) -> Self {
        Self {
            graph,
            edge_weight: Identity,
            goal: None,
            interrupt: None,
            observers: Vec::new(),
            state: None,
            ran: false,
        }
    }
}

impl<'a, W, G, F> Dijkstra<'a, W, G, F>
where
    G: GraphBase,
{
    pub fn edge_weight<F2, V, E>(self, edge_weight: F2) -> Dijkstra<'a, W, G, F2>
    where
        G: GraphRef<V, E>,
        F2: GetWeight<E, W>,
        W: Weight,
    {
        Dijkstra {
            graph: self.graph,
            edge_weight,
            goal: self.goal,
            interrupt: self.interrupt,
            observers: self.observers,
            state: self.state,
            ran: self.ran,
        }
    }

    // Using closures in `edge_weight` gives "type annotations needed" for the
    // closure argument. This method that uses explicit Fn signature
    // circumvents the problem.
    pub fn edge_weight_fn<F2, V, E>(self, edge_weight: F2) -> Dijkstra<'a, W, G, F2>
    where
        G: GraphRef<V, E>,
        F2: Fn(&E) -> W,
        W: Weight,
    {
        self.edge_weight(edge_weight)
    }

    /// Stops the search as soon as this vertex is finished. Unexplored
    /// vertices then have no recorded distance.
    pub fn goal(mut self, goal: G::VertexId) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    /// Registers an observer notified for every edge added to the shortest
    /// path tree, in relaxation order.
    pub fn on_tree_edge<O>(mut self, observer: O) -> Self
    where
        O: FnMut(&TreeEdge<G>) + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn run<V, E>(&mut self, root: G::VertexId) -> Result<(), Error>
    where
        G: Neighbors + GraphRef<V, E>,
        F: GetWeight<E, W>,
        W: Weight,
    {
        if std::mem::replace(&mut self.ran, true) {
            return Err(Error::AlreadyComputed);
        }

        // Probing the root distinguishes "no such vertex" from "a vertex
        // without outgoing edges".
        if self
            .graph
            .neighbors_directed(&root, Direction::Outgoing)
            .is_err()
        {
            return Err(Error::RootAbsent);
        }

        let mut state = Relaxation::new(root.clone(), Relaxer::Shortest);
        for observer in self.observers.drain(..) {
            state.subscribe_boxed(observer);
        }

        let mut queue = BinaryHeap::new();
        queue.push(Reverse(Weighted(root, W::Ord::from(W::zero()))));

        while let Some(Reverse(Weighted(vertex, _))) = queue.pop() {
            // Re-prioritization pushes duplicate entries instead of updating
            // the existing ones, so a vertex can be popped again after it was
            // finished.
            if state.is_finished(&vertex) {
                continue;
            }

            if let Some(interrupt) = &self.interrupt {
                if interrupt.is_triggered() {
                    self.state = Some(state);
                    return Err(Error::Interrupted);
                }
            }

            if self.goal.as_ref() == Some(&vertex) {
                state.finish(&vertex);
                self.state = Some(state);
                return Ok(());
            }

            let neighbors = self
                .graph
                .neighbors_directed(&vertex, Direction::Outgoing)
                .map_err(|_| Error::VertexNotAvailable)?;

            for neighbor in neighbors {
                if state.is_finished(&neighbor.id) {
                    continue;
                }

                let attr = self.graph.edge(&neighbor.edge).ok_or(Error::EdgeNotAvailable)?;
                let weight = self.edge_weight.get(attr);

                // The unsignedness check makes the comparison a constant
                // false for types that cannot hold negative values.
                if !W::is_unsigned() && weight < W::zero() {
                    return Err(Error::NegativeWeight);
                }

                let target = neighbor.id.clone();
                let edge = TreeEdge {
                    edge: neighbor.edge,
                    source: vertex.clone(),
                    target: neighbor.id,
                };

                if let Some(improved) = state.relax(edge, &weight) {
                    queue.push(Reverse(Weighted(target, improved.into())));
                }
            }

            state.finish(&vertex);
        }

        if let Some(goal) = &self.goal {
            if !state.is_finished(goal) {
                self.state = Some(state);
                return Err(Error::GoalNotReached);
            }
        }

        self.state = Some(state);
        Ok(())
    }
}

impl<'a, W, G, F> Search<W, G> for Dijkstra<'a, W, G, F>
where
    G: GraphBase,
{
    fn relaxation(&self) -> Option<&Relaxation<W, G>> {
        self.state.as_ref()
    }
}
