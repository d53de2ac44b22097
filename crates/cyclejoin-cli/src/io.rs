/// Graph input and cycle output.
///
/// This module is the single place where the `cyclejoin` binary touches the
/// filesystem; `cyclejoin-core` only sees strings and graphs.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - UTF-8 validation via `std::str::from_utf8` with byte-offset reporting.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::{BufWriter, Read as _, Write};
use std::path::Path;

use cyclejoin_core::{CanonicalCycle, Graph, parse_pajek};

use crate::error::CliError;
use crate::{GraphArgs, PathOrStdin};

/// A parsed graph plus what the pruning pass did to it.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    /// Edges removed by 2-core pruning (0 with `--no-prune`).
    pub pruned_edges: usize,
}

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for a missing or unreadable file, an
/// input over `max_size` bytes, or invalid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Reads and parses the graph named by `args`, pruning it to its 2-core
/// unless `--no-prune` was given.
///
/// # Errors
///
/// As [`read_input`], plus [`CliError::ParseFailed`] for malformed Pajek.
pub fn load_graph(args: &GraphArgs, max_size: u64) -> Result<LoadedGraph, CliError> {
    let content = read_input(&args.file, max_size)?;
    let mut graph =
        parse_pajek(&content, args.directed).map_err(|e| CliError::parse(&args.file.label(), &e))?;

    let pruned_edges = if args.no_prune {
        0
    } else {
        graph.prune_to_two_core()
    };
    log::debug!(
        "loaded {}: {} vertices, {} edges after removing {pruned_edges}",
        args.file.label(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(LoadedGraph {
        graph,
        pruned_edges,
    })
}

/// Writes one cycle per line, vertices separated by spaces, closing vertex
/// repeated.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if the file cannot be created or written.
pub fn write_cycles(path: &Path, cycles: &[CanonicalCycle]) -> Result<(), CliError> {
    let to_cli = |e: std::io::Error| CliError::IoError {
        source: path.display().to_string(),
        detail: e.to_string(),
    };
    let file = std::fs::File::create(path).map_err(to_cli)?;
    let mut out = BufWriter::new(file);
    write_cycle_lines(&mut out, cycles).map_err(to_cli)?;
    out.flush().map_err(to_cli)
}

fn write_cycle_lines<W: Write>(w: &mut W, cycles: &[CanonicalCycle]) -> std::io::Result<()> {
    for cycle in cycles {
        let line: Vec<String> = cycle.closed().iter().map(ToString::to_string).collect();
        writeln!(w, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Maps a failed write to stdout.
pub fn stdout_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    bytes_to_string(&bytes, &path.display().to_string())
}

fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Reads stdin capped at `max_size` bytes, probing one more byte to tell
/// "exactly at the limit" from "over the limit".
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();
    let read_error = |e: std::io::Error| CliError::StdinReadError {
        detail: e.to_string(),
    };

    let mut buf: Vec<u8> = Vec::new();
    (&mut handle)
        .take(max_size)
        .read_to_end(&mut buf)
        .map_err(read_error)?;

    if buf.len() as u64 == max_size {
        let mut probe = [0u8; 1];
        let extra = handle.read(&mut probe).map_err(read_error)?;
        if extra > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }

    bytes_to_string(&buf, "-")
}

fn bytes_to_string(bytes: &[u8], source_label: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            source: source_label.to_owned(),
            byte_offset: e.valid_up_to(),
        }),
    }
}
