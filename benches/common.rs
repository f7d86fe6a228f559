use fastrand::Rng;

use wayfind::{core::marker::Directed, storage::AdjList};

pub const RANDOM_SEED: u64 = 0xFACADE;

pub fn random_directed(vertex_count: usize, density: f32, rng: &mut Rng) -> AdjList<(), u64, Directed> {
    let mut graph = AdjList::new();

    let vertices: Vec<_> = (0..vertex_count).map(|_| graph.add_vertex(())).collect();

    for from in &vertices {
        for to in &vertices {
            if rng.f32() < density {
                graph.add_edge(from, to, rng.u64(1..100));
            }
        }
    }

    graph
}
