//! Implementation of `cyclejoin segments <file> --length k`.
//!
//! Prints the endpoint index for one segment length. Human mode writes a
//! `From a to b:` header per bucket followed by one segment per line; JSON
//! mode writes the buckets as an array.
use cyclejoin_core::{EndpointIndex, SegmentKind, Vertex, build_index_with_limit};
use serde::Serialize;

use crate::error::CliError;
use crate::io::{load_graph, stdout_error};
use crate::{Cli, GraphArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct Bucket<'a> {
    start: Vertex,
    end: Vertex,
    segments: Vec<&'a [Vertex]>,
}

#[derive(Debug, Serialize)]
struct IndexReport<'a> {
    length: usize,
    kind: SegmentKind,
    segment_count: usize,
    buckets: Vec<Bucket<'a>>,
}

impl<'a> IndexReport<'a> {
    fn from_index(index: &'a EndpointIndex) -> Self {
        let buckets = index
            .buckets()
            .map(|((start, end), ids)| Bucket {
                start,
                end,
                segments: ids.iter().map(|&id| index.segment(id)).collect(),
            })
            .collect();
        Self {
            length: index.length(),
            kind: index.kind(),
            segment_count: index.len(),
            buckets,
        }
    }
}

/// Runs the `segments` command.
///
/// # Errors
///
/// Returns [`CliError`] if the graph cannot be loaded or the index exceeds
/// `--max-segments`.
pub fn run(graph_args: &GraphArgs, length: u32, walk: bool, cli: &Cli) -> Result<(), CliError> {
    let loaded = load_graph(graph_args, cli.max_file_size)?;
    let kind = if walk {
        SegmentKind::Walk
    } else {
        SegmentKind::Path
    };
    let index = build_index_with_limit(&loaded.graph, length as usize, kind, cli.max_segments)?;
    let report = IndexReport::from_index(&index);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => print_human(&mut out, &report),
        OutputFormat::Json => print_json(&mut out, &report),
    }
    .map_err(|e| stdout_error(&e))
}

fn print_human<W: std::io::Write>(w: &mut W, report: &IndexReport<'_>) -> std::io::Result<()> {
    for bucket in &report.buckets {
        writeln!(w, "From {} to {}:", bucket.start, bucket.end)?;
        for segment in &bucket.segments {
            let vertices: Vec<String> = segment.iter().map(ToString::to_string).collect();
            writeln!(w, "  {}", vertices.join(" "))?;
        }
    }
    Ok(())
}

fn print_json<W: std::io::Write>(w: &mut W, report: &IndexReport<'_>) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, report).map_err(std::io::Error::other)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use cyclejoin_core::{Graph, build_index};

    use super::*;

    fn path_graph() -> Graph {
        Graph::from_edges(3, false, &[(0, 1), (1, 2)]).expect("valid")
    }

    #[test]
    fn human_output_groups_by_endpoints() {
        let index = build_index(&path_graph(), 2, SegmentKind::Path).expect("builds");
        let mut buf = Vec::new();
        print_human(&mut buf, &IndexReport::from_index(&index)).expect("write");
        let text = String::from_utf8(buf).expect("utf-8");
        assert_eq!(text, "From 0 to 2:\n  0 1 2\nFrom 2 to 0:\n  2 1 0\n");
    }

    #[test]
    fn json_output_lists_buckets() {
        let index = build_index(&path_graph(), 1, SegmentKind::Path).expect("builds");
        let mut buf = Vec::new();
        print_json(&mut buf, &IndexReport::from_index(&index)).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["kind"], "path");
        assert_eq!(value["segment_count"], 4);
        assert_eq!(value["buckets"].as_array().expect("array").len(), 4);
        assert_eq!(value["buckets"][0]["segments"], serde_json::json!([[0, 1]]));
    }
}
