use crate::core::{
    weight::{GetWeight, Identity, Weight},
    EdgeSet, GraphBase, GraphRef, VertexSet,
};

use super::{
    relaxation::Relaxation, relaxer::Relaxer, Error, Interrupt, Search, TreeEdge,
};

/// [Bellman-Ford
/// algorithm](https://en.wikipedia.org/wiki/Bellman%E2%80%93Ford_algorithm)
/// for single-source shortest paths on graphs that may have negative edge
/// weights.
///
/// Instead of ordering the vertices, the algorithm sweeps over all edges up
/// to |V| - 1 times. If a sweep after that still finds an improvement, the
/// costs cannot stabilize and the run fails with [`Error::NegativeCycle`]
/// (under a non-default [relaxer](BellmanFord::relaxer) this means a cycle
/// whose traversal keeps improving the cost, e.g. a positive cycle for
/// longest paths). The state of a failed run is discarded because its partial
/// distances are not valid.
///
/// On undirected graphs every edge is swept in both orientations.
///
/// All graph vertices are registered up front, so after a successful run even
/// vertices that no path reaches have a recorded distance, namely the
/// relaxer's unreached cost.
pub struct BellmanFord<'a, W, G, F = Identity>
where
    G: GraphBase,
{
    graph: &'a G,
    edge_weight: F,
    relaxer: Relaxer<W>,
    goal: Option<G::VertexId>,
    interrupt: Option<Interrupt>,
    observers: Vec<Box<dyn FnMut(&TreeEdge<G>)>>,
    state: Option<Relaxation<W, G>>,
    ran: bool,
}

impl<'a, W, G> BellmanFord<'a, W, G>
where
    G: GraphBase,
{
    pub fn on(graph: &'a G) -> Self {
        Self {
            graph,
            edge_weight: Identity,
            relaxer: Relaxer::Shortest,
            goal: None,
            interrupt: None,
            observers: Vec::new(),
            state: None,
            ran: false,
        }
    }
}

impl<'a, W, G, F> BellmanFord<'a, W, G, F>
where
    G: GraphBase,
{
    pub fn edge_weight<F2, V, E>(self, edge_weight: F2) -> BellmanFord<'a, W, G, F2>
    where
        G: GraphRef<V, E>,
        F2: GetWeight<E, W>,
        W: Weight,
    {
        BellmanFord {
            graph: self.graph,
            edge_weight,
            relaxer: self.relaxer,
            goal: self.goal,
            interrupt: self.interrupt,
            observers: self.observers,
            state: self.state,
            ran: self.ran,
        }
    }

    pub fn edge_weight_fn<F2, V, E>(self, edge_weight: F2) -> BellmanFord<'a, W, G, F2>
    where
        G: GraphRef<V, E>,
        F2: Fn(&E) -> W,
        W: Weight,
    {
        self.edge_weight(edge_weight)
    }

    /// Replaces the cost semantics of the search. [`Relaxer::Longest`] turns
    /// the run into a longest-path computation, which stabilizes only on
    /// graphs without reachable positive cycles.
    pub fn relaxer(mut self, relaxer: Relaxer<W>) -> Self {
        self.relaxer = relaxer;
        self
    }

    /// Fails the run with [`Error::GoalNotReached`] if no path to this vertex
    /// was found. Unlike the queue-driven algorithms, Bellman-Ford cannot
    /// terminate early, the goal only adds the final check.
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
        G: VertexSet + EdgeSet + GraphRef<V, E>,
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

        for vertex in self.graph.vertices_by_id() {
            state.preseed(vertex);
        }

        let both_orientations = !self.graph.is_directed();
        let mut stabilized = false;

        // Sweep all edges |V| - 1 times. Costs that can stabilize have done
        // so by then, because the longest possible tree path has |V| - 1
        // edges.
        for _ in 1..self.graph.vertex_count() {
            if let Some(interrupt) = &self.interrupt {
                if interrupt.is_triggered() {
                    self.state = Some(state);
                    return Err(Error::Interrupted);
                }
            }

            let mut relaxed = false;

            for edge in self.graph.edges_by_id() {
                let (u, v) = self.graph.endpoints(&edge).ok_or(Error::EdgeNotAvailable)?;
                let attr = self.graph.edge(&edge).ok_or(Error::EdgeNotAvailable)?;
                let weight = self.edge_weight.get(attr);

                relaxed |= state
                    .relax(
                        TreeEdge {
                            edge: edge.clone(),
                            source: u.clone(),
                            target: v.clone(),
                        },
                        &weight,
                    )
                    .is_some();

                if both_orientations {
                    relaxed |= state
                        .relax(
                            TreeEdge {
                                edge,
                                source: v,
                                target: u,
                            },
                            &weight,
                        )
                        .is_some();
                }
            }

            // No improvement in a full sweep means no later sweep can improve
            // either.
            if !relaxed {
                stabilized = true;
                break;
            }
        }

        // One more read-only sweep. Any remaining improvement can only come
        // from a cycle that keeps lowering the cost.
        if !stabilized {
            for edge in self.graph.edges_by_id() {
                let (u, v) = self.graph.endpoints(&edge).ok_or(Error::EdgeNotAvailable)?;
                let attr = self.graph.edge(&edge).ok_or(Error::EdgeNotAvailable)?;
                let weight = self.edge_weight.get(attr);

                if state.would_relax(&u, &v, &weight)
                    || (both_orientations && state.would_relax(&v, &u, &weight))
                {
                    return Err(Error::NegativeCycle);
                }
            }
        }

        let reached: Vec<_> = state
            .known_dists()
            .map(|(vertex, _)| vertex.clone())
            .filter(|vertex| state.is_reached(vertex))
            .collect();
        for vertex in reached {
            state.finish(&vertex);
        }

        if let Some(goal) = &self.goal {
            if !state.is_reached(goal) {
                self.state = Some(state);
                return Err(Error::GoalNotReached);
            }
        }

        self.state = Some(state);
        Ok(())
    }
}

impl<'a, W, G, F> Search<W, G> for BellmanFord<'a, W, G, F>
where
    G: GraphBase,
{
    fn relaxation(&self) -> Option<&Relaxation<W, G>> {
        self.state.as_ref()
    }
}
