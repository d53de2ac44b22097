//! Reader for the Pajek `.net` subset the cycle search consumes.
//!
//! ```text
//! *vertices 4
//! *edges
//! 1 2
//! 2 3
//! ```
//!
//! The first line declares `N`, the number of vertices. Vertex ids in the
//! file are 1-based, so the resulting [`Graph`] has `N + 1` vertices and
//! vertex 0 is left isolated (the enumerator skips degree-0 vertices, so it
//! never shows up in a cycle). Everything between the header and the first
//! `*edges` / `*arcs` line is ignored. Each following line that starts with
//! two integers adds one edge; any further columns (weights) are ignored.
use std::fmt;

use crate::error::CycleError;
use crate::graph::Graph;

/// Errors that make a Pajek file unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PajekError {
    /// The input is empty.
    MissingHeader,
    /// The first line is not `*vertices N`.
    InvalidHeader {
        /// The offending line.
        line: String,
    },
    /// The declared vertex count is zero or negative.
    NonPositiveVertexCount(i64),
    /// Graph construction rejected an edge.
    Graph(CycleError),
}

impl fmt::Display for PajekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PajekError::MissingHeader => f.write_str("missing *vertices line"),
            PajekError::InvalidHeader { line } => {
                write!(f, "invalid *vertices line: {line:?}")
            }
            PajekError::NonPositiveVertexCount(n) => {
                write!(f, "invalid number of vertices: {n}")
            }
            PajekError::Graph(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PajekError {}

impl From<CycleError> for PajekError {
    fn from(e: CycleError) -> Self {
        PajekError::Graph(e)
    }
}

/// Parses `text` into a [`Graph`].
///
/// Edges whose endpoints fall outside `[0, N]` are skipped with a warning;
/// they do not fail the parse.
///
/// # Errors
///
/// Returns [`PajekError`] if the header is missing or malformed, or if the
/// declared vertex count is not positive.
pub fn parse(text: &str, directed: bool) -> Result<Graph, PajekError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(PajekError::MissingHeader)?;
    let declared = parse_header(header)?;
    if declared <= 0 {
        return Err(PajekError::NonPositiveVertexCount(declared));
    }

    let vertex_count = usize::try_from(declared)
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| PajekError::InvalidHeader {
            line: header.to_owned(),
        })?;
    let mut graph = Graph::new(vertex_count, directed);

    for line in lines.by_ref() {
        if is_edge_section(line) {
            break;
        }
    }

    let mut skipped = 0usize;
    for line in lines {
        let Some((u, v)) = parse_pair(line) else {
            continue;
        };
        match (usize::try_from(u), usize::try_from(v)) {
            (Ok(u), Ok(v)) if u < vertex_count && v < vertex_count => {
                graph.add_edge(u, v)?;
            }
            _ => {
                log::warn!("skipping invalid edge: {u} {v}");
                skipped += 1;
            }
        }
    }

    log::debug!(
        "parsed pajek graph: {} vertices, {} edges, {skipped} edge(s) skipped",
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn parse_header(line: &str) -> Result<i64, PajekError> {
    let invalid = || PajekError::InvalidHeader {
        line: line.to_owned(),
    };
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().ok_or_else(invalid)?;
    if !keyword.eq_ignore_ascii_case("*vertices") {
        return Err(invalid());
    }
    tokens
        .next()
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(invalid)
}

fn is_edge_section(line: &str) -> bool {
    let line = line.trim_start();
    ["*edges", "*arcs"].iter().any(|marker| {
        line.get(..marker.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(marker))
    })
}

fn parse_pair(line: &str) -> Option<(i64, i64)> {
    let mut tokens = line.split_whitespace();
    let u = tokens.next()?.parse().ok()?;
    let v = tokens.next()?.parse().ok()?;
    Some((u, v))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_one_based_edges() {
        let g = parse("*vertices 3\n*edges\n1 2\n2 3\n3 1\n", false).expect("valid file");
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.adjacent(1, 2) && g.adjacent(3, 1));
        assert_eq!(g.degree(0), 0);
    }

    #[test]
    fn directed_flag_is_respected() {
        let g = parse("*vertices 2\n*arcs\n1 2\n", true).expect("valid file");
        assert!(g.adjacent(1, 2));
        assert!(!g.adjacent(2, 1));
    }

    #[test]
    fn vertex_labels_before_edges_are_skipped() {
        let text = "*Vertices 2\n1 \"a\"\n2 \"b\"\n*Edges 1\n1 2 0.5\n";
        let g = parse(text, false).expect("valid file");
        assert_eq!(g.edge_count(), 1);
        assert!(g.adjacent(2, 1));
    }

    #[test]
    fn out_of_range_edges_are_skipped() {
        let g = parse("*vertices 2\n*edges\n1 2\n1 9\n-1 2\n", false).expect("valid file");
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn garbage_edge_lines_are_ignored() {
        let g = parse("*vertices 2\n*edges\n\nfoo bar\n1\n1 2\n", false).expect("valid file");
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn no_edge_section_gives_empty_graph() {
        let g = parse("*vertices 5\n", false).expect("valid file");
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn empty_input_is_missing_header() {
        assert_eq!(
            parse("", false).expect_err("no header"),
            PajekError::MissingHeader
        );
    }

    #[test]
    fn wrong_header_is_rejected() {
        let err = parse("*edges\n1 2\n", false).expect_err("bad header");
        assert!(matches!(err, PajekError::InvalidHeader { .. }));
        assert!(err.to_string().contains("*edges"));
    }

    #[test]
    fn zero_vertices_is_rejected() {
        assert_eq!(
            parse("*vertices 0\n", false).expect_err("zero vertices"),
            PajekError::NonPositiveVertexCount(0)
        );
    }
}
