//! Deterministic random graphs.
//!
//! [`generate_graph`] draws an Erdős–Rényi `G(n, p)` graph from a seeded
//! [`StdRng`]; the same config always yields the same graph.

use cyclejoin_core::{Graph, Vertex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for the random graph generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of vertices.
    pub vertices: usize,
    /// Probability that any given edge (or arc) is present.
    pub edge_probability: f64,
    /// Draw arcs instead of edges.
    pub directed: bool,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 30 vertices, ~65 edges
    Small,
    /// 100 vertices, ~300 edges
    Medium,
    /// 400 vertices, ~1200 edges
    Large,
}

impl SizeTier {
    /// Returns the undirected `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let (vertices, edge_probability) = match self {
            SizeTier::Small => (30, 0.15),
            SizeTier::Medium => (100, 0.06),
            SizeTier::Large => (400, 0.015),
        };
        GeneratorConfig {
            seed,
            vertices,
            edge_probability,
            directed: false,
        }
    }

    /// Short label used in benchmark ids and fixture names.
    pub fn label(self) -> &'static str {
        match self {
            SizeTier::Small => "S",
            SizeTier::Medium => "M",
            SizeTier::Large => "L",
        }
    }
}

/// Generates a `G(n, p)` graph without self-loops.
pub fn generate_graph(config: &GeneratorConfig) -> Graph {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let p = config.edge_probability.clamp(0.0, 1.0);
    let n = config.vertices;

    let mut edges = Vec::new();
    for u in 0..n {
        let first = if config.directed { 0 } else { u + 1 };
        for v in first..n {
            if u != v && rng.gen_bool(p) {
                edges.push((u, v));
            }
        }
    }
    build(n, config.directed, &edges)
}

/// The complete undirected graph on `n` vertices.
pub fn complete_graph(n: usize) -> Graph {
    let edges: Vec<_> = (0..n)
        .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
        .collect();
    build(n, false, &edges)
}

/// A single cycle through all `n` vertices, `0 -> 1 -> ... -> n-1 -> 0`.
pub fn ring(n: usize, directed: bool) -> Graph {
    let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    build(n, directed, &edges)
}

/// Serializes `graph` as Pajek with 1-based vertex ids.
pub fn to_pajek(graph: &Graph) -> String {
    let section = if graph.is_directed() { "*Arcs" } else { "*Edges" };
    let mut lines = vec![format!("*Vertices {}", graph.vertex_count()), section.to_owned()];
    for u in 0..graph.vertex_count() {
        for v in graph.neighbors(u) {
            if graph.is_directed() || u <= v {
                lines.push(format!("{} {}", u + 1, v + 1));
            }
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

// Every endpoint comes from `0..n`, so construction cannot fail.
fn build(n: usize, directed: bool, edges: &[(Vertex, Vertex)]) -> Graph {
    let mut graph = Graph::new(n, directed);
    for &(u, v) in edges {
        if graph.add_edge(u, v).is_err() {
            break;
        }
    }
    graph
}
