//! Implementation of `cyclejoin inspect <file>`.
//!
//! Prints the size of the graph after loading (and pruning, unless
//! `--no-prune`), and how many vertices have each degree.
use std::collections::BTreeMap;

use cyclejoin_core::Graph;
use serde::Serialize;

use crate::error::CliError;
use crate::io::{load_graph, stdout_error};
use crate::{Cli, GraphArgs, OutputFormat};

/// Statistics gathered from a loaded [`Graph`].
#[derive(Debug, Serialize)]
pub struct InspectStats {
    /// Vertex slots, including unused ones.
    pub vertex_count: usize,
    /// Vertices with at least one incident edge.
    pub active_vertices: usize,
    pub edge_count: usize,
    pub directed: bool,
    pub pruned_edges: usize,
    /// Number of active vertices per degree.
    pub degree_histogram: BTreeMap<usize, usize>,
}

impl InspectStats {
    /// Computes statistics from a loaded graph.
    pub fn from_graph(graph: &Graph, pruned_edges: usize) -> Self {
        let mut degree_histogram = BTreeMap::new();
        for degree in graph.degrees().into_iter().filter(|&d| d > 0) {
            *degree_histogram.entry(degree).or_insert(0) += 1;
        }
        Self {
            vertex_count: graph.vertex_count(),
            active_vertices: graph.active_vertex_count(),
            edge_count: graph.edge_count(),
            directed: graph.is_directed(),
            pruned_edges,
            degree_histogram,
        }
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the graph cannot be loaded.
pub fn run(graph_args: &GraphArgs, cli: &Cli) -> Result<(), CliError> {
    let loaded = load_graph(graph_args, cli.max_file_size)?;
    let stats = InspectStats::from_graph(&loaded.graph, loaded.pruned_edges);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => print_json(&mut out, &stats),
    }
    .map_err(|e| stdout_error(&e))
}

fn print_human<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "vertices:       {}", stats.vertex_count)?;
    writeln!(w, "active:         {}", stats.active_vertices)?;
    writeln!(w, "edges:          {}", stats.edge_count)?;
    writeln!(w, "directed:       {}", stats.directed)?;
    writeln!(w, "pruned_edges:   {}", stats.pruned_edges)?;
    writeln!(w, "degrees:")?;
    for (degree, count) in &stats.degree_histogram {
        writeln!(w, "  {degree}: {count}")?;
    }
    Ok(())
}

fn print_json<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, stats).map_err(std::io::Error::other)?;
    writeln!(w)
}
