use std::{cmp::Reverse, collections::BinaryHeap};

use crate::core::{
    marker::Direction,
    weight::{GetWeight, Identity, Weight, Weighted},
    GraphBase, GraphRef, Neighbors,
};

use super::{
    relaxation::Relaxation, relaxer::Relaxer, Error, Interrupt, Search, TreeEdge,
};

/// [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm), Dijkstra's
/// algorithm biased towards a goal by a heuristic.
///
/// The heuristic estimates the remaining cost from a vertex to the goal and
/// is folded into the queue priority only. Distances are always combined and
/// recorded from true edge weights, so on completion the recorded values are
/// real path costs, not heuristic estimates.
///
/// For the result to be optimal the heuristic must be admissible (it never
/// overestimates the remaining cost) and consistent. With a heuristic that is
/// constant zero the search degenerates to [Dijkstra](super::Dijkstra).
///
/// Like Dijkstra, the algorithm discovers vertices lazily and rejects
/// negative edge weights.
pub struct AStar<'a, W, G, H, F = Identity>
where
    G: GraphBase,
{
    graph: &'a G,
    heuristic: H,
    edge_weight: F,
    goal: Option<G::VertexId>,
    interrupt: Option<Interrupt>,
    observers: Vec<Box<dyn FnMut(&TreeEdge<G>)>>,
    state: Option<Relaxation<W, G>>,
    ran: bool,
}

impl<'a, W, G, H> AStar<'a, W, G, H>
where
    G: GraphBase,
{
    pub fn on(graph: &'a G, heuristic: H) -> Self {
        Self {
            graph,
            heuristic,
            edge_weight: Identity,
            goal: None,
            interrupt: None,
            observers: Vec::new(),
            state: None,
            ran: false,
        }
    }
}

impl<'a, W, G, H, F> AStar<'a, W, G, H, F>
where
    G: GraphBase,
{
    pub fn edge_weight<F2, V, E>(self, edge_weight: F2) -> AStar<'a, W, G, H, F2>
    where
        G: GraphRef<V, E>,
        F2: GetWeight<E, W>,
        W: Weight,
    {
        AStar {
            graph: self.graph,
            heuristic: self.heuristic,
            edge_weight,
            goal: self.goal,
            interrupt: self.interrupt,
            observers: self.observers,
            state: self.state,
            ran: self.ran,
        }
    }

    pub fn edge_weight_fn<F2, V, E>(self, edge_weight: F2) -> AStar<'a, W, G, H, F2>
    where
        G: GraphRef<V, E>,
        F2: Fn(&E) -> W,
        W: Weight,
    {
        self.edge_weight(edge_weight)
    }

    /// Stops the search as soon as this vertex is finished.
    pub fn goal(mut self, goal: G::VertexId) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    /// Registers an observer notified for every edge added to the search
    /// tree, in relaxation order.
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
        H: Fn(&G::VertexId) -> W,
        F: GetWeight<E, W>,
        W: Weight,
    {
        if std::mem::replace(&mut self.ran, true) {
            return Err(Error::AlreadyComputed);
        }

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
        let root_priority = W::zero() + (self.heuristic)(&root);
        queue.push(Reverse(Weighted(root, W::Ord::from(root_priority))));

        while let Some(Reverse(Weighted(vertex, _))) = queue.pop() {
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
                    // The estimate biases only the expansion order. The
                    // recorded distance stays the true cost.
                    let priority = improved + (self.heuristic)(&target);
                    queue.push(Reverse(Weighted(target, priority.into())));
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

impl<'a, W, G, H, F> Search<W, G> for AStar<'a, W, G, H, F>
where
    G: GraphBase,
{
    fn relaxation(&self) -> Option<&Relaxation<W, G>> {
        self.state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        algo::shortest_paths::{Distances, PathTree},
        core::{
            id::{EdgeId, VertexId},
            marker::{Directed, Undirected},
        },
        storage::AdjList,
    };

    fn v(index: usize) -> VertexId {
        index.into()
    }

    fn e(index: usize) -> EdgeId {
        index.into()
    }

    // A 3x3 king-less grid with unit steps, vertices numbered row by row:
    //
    //     0 - 1 - 2
    //     |   |   |
    //     3 - 4 - 5
    //     |   |   |
    //     6 - 7 - 8
    fn create_grid() -> AdjList<(), u32, Undirected> {
        let mut graph = AdjList::new();

        let vertices: Vec<_> = (0..9).map(|_| graph.add_vertex(())).collect();

        for row in 0..3 {
            for col in 0..3 {
                let index = 3 * row + col;
                if col < 2 {
                    graph.add_edge(&vertices[index], &vertices[index + 1], 1);
                }
                if row < 2 {
                    graph.add_edge(&vertices[index], &vertices[index + 3], 1);
                }
            }
        }

        graph
    }

    // Manhattan distance to the bottom-right corner.
    fn manhattan_to_corner(vertex: &VertexId) -> u32 {
        let index = vertex.as_usize() as u32;
        let (row, col) = (index / 3, index % 3);
        (2 - row) + (2 - col)
    }

    #[test]
    fn finds_shortest_path_on_grid() {
        let graph = create_grid();
        let mut search = AStar::on(&graph, manhattan_to_corner).goal(v(8));
        search.run(v(0)).unwrap();

        assert_eq!(search.dist(&v(8)), Ok(&4));
        assert_eq!(search.try_path(&v(8)).unwrap().len(), 4);
    }

    #[test]
    fn agrees_with_dijkstra_under_zero_heuristic() {
        let graph = create_grid();

        let mut astar = AStar::on(&graph, |_: &VertexId| 0u32);
        astar.run(v(0)).unwrap();

        let mut dijkstra = crate::algo::shortest_paths::Dijkstra::on(&graph);
        dijkstra.run(v(0)).unwrap();

        for index in 0..9 {
            assert_eq!(astar.dist(&v(index)), dijkstra.dist(&v(index)));
        }
    }

    #[test]
    fn heuristic_does_not_distort_distances() {
        // A deliberately overcautious but still admissible heuristic on a
        // weighted graph: the recorded distances must be true costs.
        let mut graph = AdjList::<(), u32, Directed>::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        let v2 = graph.add_vertex(());

        graph.add_edge(&v0, &v1, 10);
        graph.add_edge(&v1, &v2, 10);
        graph.add_edge(&v0, &v2, 25);

        let mut search = AStar::on(&graph, |_: &VertexId| 1u32).goal(v2);
        search.run(v0).unwrap();

        assert_eq!(search.dist(&v2), Ok(&20));
        assert_eq!(search.try_path(&v2), Ok(vec![e(0), e(1)]));
    }

    #[test]
    fn goal_cuts_off_exploration() {
        let mut graph = AdjList::<(), u32, Directed>::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        let v2 = graph.add_vertex(());

        graph.add_edge(&v0, &v1, 1);
        graph.add_edge(&v1, &v2, 1);

        let mut search = AStar::on(&graph, |_: &VertexId| 0u32).goal(v1);
        search.run(v0).unwrap();

        assert_eq!(search.dist(&v1), Ok(&1));
        assert_eq!(search.try_dist(&v2), Ok(None));
    }

    #[test]
    fn negative_edge() {
        let mut graph = AdjList::<(), i32, Directed>::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        graph.add_edge(&v0, &v1, -3);

        let mut search = AStar::on(&graph, |_: &VertexId| 0i32);
        assert_matches!(search.run(v0), Err(Error::NegativeWeight));
    }
}
