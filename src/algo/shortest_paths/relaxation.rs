use std::collections::hash_map;

use rustc_hash::FxHashMap;

use crate::{
    core::{weight::Weight, GraphBase},
    visit::Color,
};

use super::{relaxer::Relaxer, TreeEdge};

/// The state every single-source search algorithm shares: the distance map,
/// the color map, the predecessor tree and the [`Relaxer`] that gives the
/// costs their meaning.
///
/// A concrete algorithm owns one `Relaxation` per run, feeds it candidate
/// edges in its own order via [relax](Relaxation::relax) and publishes it for
/// querying when the run ends. All maps grow monotonically during a run and
/// colors only move forward (White to Gray to Black), which is enforced here
/// rather than in the algorithms.
pub struct Relaxation<W, G: GraphBase> {
    root: G::VertexId,
    relaxer: Relaxer<W>,
    dist: FxHashMap<G::VertexId, W>,
    pred: FxHashMap<G::VertexId, TreeEdge<G>>,
    color: FxHashMap<G::VertexId, Color>,
    observers: Vec<Box<dyn FnMut(&TreeEdge<G>)>>,
}

impl<W, G> Relaxation<W, G>
where
    W: Weight,
    G: GraphBase,
{
    /// Creates the state for a search rooted in `root`. The root is recorded
    /// at the relaxer's identity cost and colored Gray.
    pub fn new(root: G::VertexId, relaxer: Relaxer<W>) -> Self {
        let mut dist = FxHashMap::default();
        dist.insert(root.clone(), relaxer.identity());

        let mut color = FxHashMap::default();
        color.insert(root.clone(), Color::Gray);

        Self {
            root,
            relaxer,
            dist,
            pred: FxHashMap::default(),
            color,
            observers: Vec::new(),
        }
    }

    pub fn root(&self) -> &G::VertexId {
        &self.root
    }

    pub fn relaxer(&self) -> &Relaxer<W> {
        &self.relaxer
    }

    /// Registers an observer notified synchronously whenever a relaxation
    /// succeeds, i.e. whenever an edge becomes part of the search tree.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&TreeEdge<G>) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub(crate) fn subscribe_boxed(&mut self, observer: Box<dyn FnMut(&TreeEdge<G>)>) {
        self.observers.push(observer);
    }

    /// Registers a vertex up front at the unreached cost, colored White.
    ///
    /// Algorithms that enumerate the whole vertex set use this so that even
    /// vertices no path reaches are present in the recorded state. Vertices
    /// already recorded (the root in particular) are left untouched.
    pub fn preseed(&mut self, vertex: G::VertexId) {
        let unreached = self.relaxer.unreached();
        self.dist.entry(vertex.clone()).or_insert(unreached);
        self.color.entry(vertex).or_insert(Color::White);
    }

    /// Overwrites the recorded distance of a vertex.
    pub fn set_dist(&mut self, vertex: G::VertexId, dist: W) {
        self.dist.insert(vertex, dist);
    }

    /// The recorded distance of a vertex, if there is one.
    pub fn try_dist(&self, vertex: &G::VertexId) -> Option<&W> {
        self.dist.get(vertex)
    }

    /// The recorded distance of a vertex, or the relaxer's unreached cost.
    pub fn dist_or_unreached(&self, vertex: &G::VertexId) -> W {
        self.dist
            .get(vertex)
            .cloned()
            .unwrap_or_else(|| self.relaxer.unreached())
    }

    /// Returns `true` if a real path cost has been recorded for the vertex.
    pub fn is_reached(&self, vertex: &G::VertexId) -> bool {
        matches!(self.dist.get(vertex), Some(d) if *d != self.relaxer.unreached())
    }

    /// Iterates over all vertices with a recorded distance, in no particular
    /// order. Includes vertices that were only [preseeded](Relaxation::preseed).
    pub fn known_dists(&self) -> KnownDists<'_, W, G> {
        KnownDists {
            inner: self.dist.iter(),
        }
    }

    pub fn color(&self, vertex: &G::VertexId) -> Option<Color> {
        self.color.get(vertex).copied()
    }

    /// Moves a vertex onto the frontier. White vertices become Gray, Gray and
    /// Black vertices are left as they are.
    pub fn discover(&mut self, vertex: &G::VertexId) {
        let color = self.color.entry(vertex.clone()).or_insert(Color::White);
        if *color == Color::White {
            *color = Color::Gray;
        }
    }

    /// Marks a vertex as finished.
    pub fn finish(&mut self, vertex: &G::VertexId) {
        self.color.insert(vertex.clone(), Color::Black);
    }

    pub fn is_finished(&self, vertex: &G::VertexId) -> bool {
        self.color(vertex) == Some(Color::Black)
    }

    /// Tests whether traveling `edge` improves the cost recorded for its
    /// target and records the improvement if it does.
    ///
    /// On success the target's distance is updated, the edge replaces the
    /// target's predecessor in the search tree, observers are notified and the
    /// improved cost is returned so that the caller can reprioritize the
    /// target. An edge from a vertex that no path has reached never improves
    /// anything and is skipped without evaluating the combine operation.
    pub fn relax(&mut self, edge: TreeEdge<G>, weight: &W) -> Option<W> {
        let candidate = self.candidate(&edge.source, weight)?;

        if !self.improves_recorded(&candidate, &edge.target) {
            return None;
        }

        self.dist.insert(edge.target.clone(), candidate.clone());
        self.discover(&edge.target);
        self.pred.insert(edge.target.clone(), edge.clone());

        for observer in &mut self.observers {
            observer(&edge);
        }

        Some(candidate)
    }

    /// Read-only variant of [relax](Relaxation::relax): reports whether the
    /// edge would improve its target without recording anything.
    pub fn would_relax(&self, source: &G::VertexId, target: &G::VertexId, weight: &W) -> bool {
        match self.candidate(source, weight) {
            Some(candidate) => self.improves_recorded(&candidate, target),
            None => false,
        }
    }

    /// Reconstructs the edges of the tree path from the root to `target`, or
    /// `None` if no recorded path reaches the root.
    ///
    /// Every vertex has at most one predecessor edge, so the walk is over a
    /// tree and terminates after at most as many steps as there are vertices,
    /// no matter what cycles the underlying graph has. The step budget below
    /// guards the one exception: a run interrupted while a non-stabilizing
    /// cycle was being relaxed can leave a cycle in the predecessor relation,
    /// which is reported as "no path" instead of walked forever.
    pub fn path_to(&self, target: &G::VertexId) -> Option<Vec<G::EdgeId>> {
        if *target != self.root && !self.pred.contains_key(target) {
            return None;
        }

        let mut edges = Vec::new();
        let mut current = target.clone();
        let mut budget = self.pred.len() + 1;

        while current != self.root {
            budget = budget.checked_sub(1)?;

            let edge = self.pred.get(&current)?;
            edges.push(edge.edge.clone());
            current = edge.source.clone();
        }

        edges.reverse();
        Some(edges)
    }

    fn candidate(&self, source: &G::VertexId, weight: &W) -> Option<W> {
        let source_dist = self.dist.get(source)?;

        if *source_dist == self.relaxer.unreached() {
            return None;
        }

        Some(self.relaxer.combine(source_dist, weight))
    }

    fn improves_recorded(&self, candidate: &W, target: &G::VertexId) -> bool {
        match self.dist.get(target) {
            Some(current) => self.relaxer.improves(candidate, current),
            None => self.relaxer.improves(candidate, &self.relaxer.unreached()),
        }
    }
}

/// Iterator over the vertices with a recorded distance.
///
/// Returned by [`Relaxation::known_dists`] and
/// [`Distances::known_dists`](super::Distances::known_dists).
#[derive(Debug)]
pub struct KnownDists<'a, W, G: GraphBase> {
    inner: hash_map::Iter<'a, G::VertexId, W>,
}

impl<'a, W, G: GraphBase> Iterator for KnownDists<'a, W, G> {
    type Item = (&'a G::VertexId, &'a W);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        core::id::{EdgeId, VertexId},
        core::marker::Directed,
    };

    enum TestGraph {}

    impl GraphBase for TestGraph {
        type VertexId = VertexId;
        type EdgeId = EdgeId;
        type EdgeType = Directed;
    }

    fn v(index: usize) -> VertexId {
        index.into()
    }

    fn edge(id: usize, source: usize, target: usize) -> TreeEdge<TestGraph> {
        TreeEdge {
            edge: id.into(),
            source: v(source),
            target: v(target),
        }
    }

    #[test]
    fn root_starts_at_identity() {
        let state = Relaxation::<i32, TestGraph>::new(v(0), Relaxer::Shortest);

        assert_eq!(state.try_dist(&v(0)), Some(&0));
        assert_eq!(state.color(&v(0)), Some(Color::Gray));
        assert_eq!(state.try_dist(&v(1)), None);
        assert_eq!(state.color(&v(1)), None);
    }

    #[test]
    fn relax_records_improvement_and_tree_edge() {
        let mut state = Relaxation::<i32, TestGraph>::new(v(0), Relaxer::Shortest);

        assert_eq!(state.relax(edge(0, 0, 1), &3), Some(3));
        assert_eq!(state.try_dist(&v(1)), Some(&3));
        assert_eq!(state.color(&v(1)), Some(Color::Gray));
        assert_eq!(state.path_to(&v(1)), Some(vec![EdgeId::from(0usize)]));

        // A worse candidate must not overwrite anything.
        assert_eq!(state.relax(edge(1, 0, 1), &5), None);
        assert_eq!(state.try_dist(&v(1)), Some(&3));
        assert_eq!(state.path_to(&v(1)), Some(vec![EdgeId::from(0usize)]));

        // A better one replaces both distance and predecessor.
        assert_eq!(state.relax(edge(2, 0, 1), &1), Some(1));
        assert_eq!(state.path_to(&v(1)), Some(vec![EdgeId::from(2usize)]));
    }

    #[test]
    fn relax_from_unreached_source_is_noop() {
        let mut state = Relaxation::<u32, TestGraph>::new(v(0), Relaxer::Shortest);
        state.preseed(v(5));

        // Would overflow u32::MAX + 1 if the combine was evaluated.
        assert_eq!(state.relax(edge(0, 5, 6), &1), None);
        assert_eq!(state.try_dist(&v(6)), None);

        // The same holds for a source that was never recorded at all.
        assert_eq!(state.relax(edge(1, 7, 8), &1), None);
    }

    #[test]
    fn preseed_keeps_root_and_registers_rest() {
        let mut state = Relaxation::<i32, TestGraph>::new(v(0), Relaxer::Shortest);
        state.preseed(v(0));
        state.preseed(v(1));

        assert_eq!(state.try_dist(&v(0)), Some(&0));
        assert_eq!(state.color(&v(0)), Some(Color::Gray));
        assert_eq!(state.try_dist(&v(1)), Some(&i32::MAX));
        assert_eq!(state.color(&v(1)), Some(Color::White));
        assert!(!state.is_reached(&v(1)));

        let known: Vec<_> = state.known_dists().map(|(v, _)| *v).collect();
        assert_eq!(known.len(), 2);
    }

    #[test]
    fn colors_never_move_backwards() {
        let mut state = Relaxation::<i32, TestGraph>::new(v(0), Relaxer::Shortest);

        state.discover(&v(1));
        assert_eq!(state.color(&v(1)), Some(Color::Gray));

        state.finish(&v(1));
        state.discover(&v(1));
        assert_eq!(state.color(&v(1)), Some(Color::Black));
    }

    #[test]
    fn observers_fire_in_relaxation_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();

        let mut state = Relaxation::<i32, TestGraph>::new(v(0), Relaxer::Shortest);
        state.subscribe(move |edge: &TreeEdge<TestGraph>| {
            sink.borrow_mut().push(edge.edge);
        });

        state.relax(edge(0, 0, 1), &2);
        state.relax(edge(1, 1, 2), &2);
        // Fails, must not fire.
        state.relax(edge(2, 0, 2), &7);

        assert_eq!(
            *events.borrow(),
            vec![EdgeId::from(0usize), EdgeId::from(1usize)]
        );
    }

    #[test]
    fn path_to_root_is_empty() {
        let state = Relaxation::<i32, TestGraph>::new(v(0), Relaxer::Shortest);

        assert_eq!(state.path_to(&v(0)), Some(Vec::new()));
        assert_eq!(state.path_to(&v(1)), None);
    }

    #[test]
    fn would_relax_probe_does_not_mutate() {
        let mut state = Relaxation::<i32, TestGraph>::new(v(0), Relaxer::Shortest);
        state.relax(edge(0, 0, 1), &3);

        assert!(state.would_relax(&v(0), &v(1), &1));
        assert!(!state.would_relax(&v(0), &v(1), &3));
        assert_eq!(state.try_dist(&v(1)), Some(&3));
    }
}
