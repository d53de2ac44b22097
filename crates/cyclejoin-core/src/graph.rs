//! The static graph the cycle search runs over.
//!
//! Vertices are dense `usize` indices in `[0, n)`. The graph is stored as a
//! `petgraph` [`StableDiGraph`]; an undirected edge `{u, v}` is kept as the
//! two opposite arcs `u -> v` and `v -> u`, so traversal code only ever
//! follows outgoing arcs regardless of directedness.
//!
//! Node indices stay valid under edge removal because [`StableDiGraph`] uses
//! tombstones, which is what the 2-core pruning pass relies on.
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::error::CycleError;

/// A vertex of the graph: a dense index in `[0, vertex_count)`.
pub type Vertex = usize;

/// Adjacency structure consumed by the segment enumerator.
#[derive(Debug, Clone)]
pub struct Graph {
    graph: StableDiGraph<(), ()>,
    directed: bool,
}

impl Graph {
    /// Creates a graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        let mut graph = StableDiGraph::with_capacity(vertex_count, 0);
        for _ in 0..vertex_count {
            graph.add_node(());
        }
        Self { graph, directed }
    }

    /// Builds a graph from an edge list.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::VertexOutOfRange`] if an edge endpoint is not in
    /// `[0, vertex_count)`.
    pub fn from_edges(
        vertex_count: usize,
        directed: bool,
        edges: &[(Vertex, Vertex)],
    ) -> Result<Self, CycleError> {
        let mut graph = Self::new(vertex_count, directed);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Number of vertices, including isolated ones.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if edges are one-way arcs.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of edges. An undirected edge counts once even though it is
    /// stored as two arcs.
    pub fn edge_count(&self) -> usize {
        if self.directed {
            return self.graph.edge_count();
        }
        let loops = self
            .graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();
        (self.graph.edge_count() - loops) / 2 + loops
    }

    /// Adds the edge `u -> v` (and `v -> u` when undirected).
    ///
    /// Adding an edge that already exists is a no-op; returns `true` if the
    /// edge was new.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::VertexOutOfRange`] for an unknown endpoint.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<bool, CycleError> {
        let a = self.node(u)?;
        let b = self.node(v)?;
        if self.graph.contains_edge(a, b) {
            return Ok(false);
        }
        self.graph.add_edge(a, b, ());
        if !self.directed && a != b && !self.graph.contains_edge(b, a) {
            self.graph.add_edge(b, a, ());
        }
        Ok(true)
    }

    /// The adjacency predicate: `true` if an arc `u -> v` exists.
    ///
    /// Out-of-range vertices are never adjacent to anything.
    pub fn adjacent(&self, u: Vertex, v: Vertex) -> bool {
        match (self.node(u), self.node(v)) {
            (Ok(a), Ok(b)) => self.graph.contains_edge(a, b),
            (Err(_), _) | (_, Err(_)) => false,
        }
    }

    /// Vertices reachable from `v` in one step.
    pub fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        let node = self.node(v).ok();
        node.into_iter().flat_map(move |n| {
            self.graph
                .neighbors_directed(n, Direction::Outgoing)
                .map(NodeIndex::index)
        })
    }

    /// Degree of `v`: neighbor count for undirected graphs, in-degree plus
    /// out-degree for directed ones. Out-of-range vertices have degree 0.
    pub fn degree(&self, v: Vertex) -> usize {
        let Ok(node) = self.node(v) else {
            return 0;
        };
        let out = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .count();
        if !self.directed {
            return out;
        }
        out + self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .count()
    }

    /// The degree table, indexed by vertex.
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.vertex_count()).map(|v| self.degree(v)).collect()
    }

    /// Number of vertices with nonzero degree.
    pub fn active_vertex_count(&self) -> usize {
        (0..self.vertex_count())
            .filter(|&v| self.degree(v) > 0)
            .count()
    }

    /// Reduces the graph to its 2-core by repeatedly deleting the single
    /// incident edge of every degree-1 vertex until nothing changes.
    ///
    /// No simple cycle passes through a degree-1 vertex, so pruning never
    /// changes the set of cycles; it only shrinks the search. Returns the
    /// number of edges removed.
    pub fn prune_to_two_core(&mut self) -> usize {
        let mut degrees = self.degrees();
        let mut removed = 0;
        let mut changed = true;

        while changed {
            changed = false;
            for v in 0..degrees.len() {
                if degrees[v] != 1 {
                    continue;
                }
                let node = NodeIndex::new(v);
                let Some((edge, other)) = self.incident_edge(node) else {
                    continue;
                };
                self.graph.remove_edge(edge);
                if !self.directed && other != node {
                    if let Some(mirror) = self.graph.find_edge(other, node) {
                        self.graph.remove_edge(mirror);
                    }
                }
                degrees[v] -= 1;
                if other != node {
                    degrees[other.index()] -= 1;
                }
                removed += 1;
                changed = true;
            }
        }

        log::debug!("2-core pruning removed {removed} edge(s)");
        removed
    }

    /// Returns some edge touching `node` and the vertex at its other end,
    /// preferring outgoing arcs.
    fn incident_edge(&self, node: NodeIndex) -> Option<(EdgeIndex, NodeIndex)> {
        let outgoing = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .next();
        if outgoing.is_some() || !self.directed {
            return outgoing;
        }
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| (e.id(), e.source()))
            .next()
    }

    fn node(&self, v: Vertex) -> Result<NodeIndex, CycleError> {
        if v < self.vertex_count() {
            Ok(NodeIndex::new(v))
        } else {
            Err(CycleError::VertexOutOfRange {
                vertex: v,
                vertex_count: self.vertex_count(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn triangle_with_tail() -> Graph {
        // 0-1-2-0 plus the tail 2-3-4.
        Graph::from_edges(5, false, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)])
            .expect("valid edges")
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let g = Graph::from_edges(3, false, &[(0, 1)]).expect("valid edges");
        assert!(g.adjacent(0, 1));
        assert!(g.adjacent(1, 0));
        assert!(!g.adjacent(0, 2));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn directed_edges_are_one_way() {
        let g = Graph::from_edges(3, true, &[(0, 1)]).expect("valid edges");
        assert!(g.adjacent(0, 1));
        assert!(!g.adjacent(1, 0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut g = Graph::new(2, false);
        assert!(g.add_edge(0, 1).expect("in range"));
        assert!(!g.add_edge(0, 1).expect("in range"));
        assert!(!g.add_edge(1, 0).expect("in range"));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(0), 1);
    }

    #[test]
    fn out_of_range_edge_is_rejected() {
        let mut g = Graph::new(2, false);
        let err = g.add_edge(0, 7).expect_err("vertex 7 does not exist");
        assert_eq!(
            err,
            CycleError::VertexOutOfRange {
                vertex: 7,
                vertex_count: 2
            }
        );
        assert!(!g.adjacent(0, 7));
        assert_eq!(g.degree(7), 0);
        assert_eq!(g.neighbors(7).count(), 0);
    }

    #[test]
    fn directed_degree_counts_both_directions() {
        let g = Graph::from_edges(3, true, &[(0, 1), (2, 0)]).expect("valid edges");
        assert_eq!(g.degrees(), vec![2, 1, 1]);
    }

    #[test]
    fn self_loop_counts_once_undirected() {
        let g = Graph::from_edges(2, false, &[(0, 0), (0, 1)]).expect("valid edges");
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(0), 2);
    }

    #[test]
    fn pruning_removes_tail_but_keeps_triangle() {
        let mut g = triangle_with_tail();
        let removed = g.prune_to_two_core();
        assert_eq!(removed, 2);
        assert_eq!(g.degrees(), vec![2, 2, 2, 0, 0]);
        assert!(g.adjacent(0, 1) && g.adjacent(1, 2) && g.adjacent(2, 0));
        assert!(!g.adjacent(2, 3));
        assert!(!g.adjacent(4, 3));
    }

    #[test]
    fn pruning_a_tree_removes_everything() {
        let mut g =
            Graph::from_edges(5, false, &[(0, 1), (0, 2), (2, 3), (2, 4)]).expect("valid edges");
        assert_eq!(g.prune_to_two_core(), 4);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.active_vertex_count(), 0);
    }

    #[test]
    fn pruning_directed_follows_incoming_arcs() {
        // 0 -> 1 -> 2 -> 0 cycle, plus 3 -> 0 feeding in.
        let mut g =
            Graph::from_edges(4, true, &[(0, 1), (1, 2), (2, 0), (3, 0)]).expect("valid edges");
        assert_eq!(g.prune_to_two_core(), 1);
        assert!(!g.adjacent(3, 0));
        assert_eq!(g.degrees(), vec![2, 2, 2, 0]);
    }

    #[test]
    fn pruning_leaves_no_degree_one_vertex() {
        let mut g = Graph::from_edges(
            8,
            false,
            &[(0, 1), (1, 2), (2, 3), (3, 0), (3, 4), (4, 5), (5, 6), (1, 7)],
        )
        .expect("valid edges");
        g.prune_to_two_core();
        assert!(g.degrees().iter().all(|&d| d != 1));
        assert_eq!(g.edge_count(), 4);
    }
}
