//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

impl PathOrStdin {
    /// Label used in messages: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            PathOrStdin::Stdin => "-".to_owned(),
            PathOrStdin::Path(path) => path.display().to_string(),
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` prints aligned text lines. `Json` prints a single JSON object.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// Graph input shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct GraphArgs {
    /// Path to a Pajek `.net` file, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub file: PathOrStdin,
    /// Read edges as directed arcs.
    #[arg(long)]
    pub directed: bool,
    /// Skip the 2-core pruning pass before searching.
    #[arg(long)]
    pub no_prune: bool,
}

/// All top-level subcommands exposed by the `cyclejoin` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Count the simple cycles of a given length.
    Count {
        #[command(flatten)]
        graph: GraphArgs,
        /// Target cycle length in edges.
        #[arg(long, short = 'l', value_parser = clap::value_parser!(u32).range(1..))]
        length: u32,
        /// Segment lengths to join, comma-separated (repeatable; default: even split).
        #[arg(long, value_name = "K1,K2[,K3[,K4]]", conflicts_with = "walk")]
        split: Vec<String>,
        /// Test closed walks of the full length directly instead of joining.
        #[arg(long)]
        walk: bool,
        /// Write the cycles, one per line, to this file.
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print every segment of a given length, grouped by endpoints.
    Segments {
        #[command(flatten)]
        graph: GraphArgs,
        /// Segment length in edges.
        #[arg(long, short = 'l', value_parser = clap::value_parser!(u32).range(1..))]
        length: u32,
        /// Allow the last step to return to the start vertex.
        #[arg(long)]
        walk: bool,
    },

    /// Print summary statistics for a graph.
    Inspect {
        #[command(flatten)]
        graph: GraphArgs,
    },
}

/// Root CLI struct for the `cyclejoin` binary.
#[derive(Parser)]
#[command(
    name = "cyclejoin",
    version,
    about = "Enumerate fixed-length simple cycles by joining indexed path segments"
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log index builds and join statistics to stderr
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `CYCLEJOIN_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "CYCLEJOIN_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,

    /// Abort when a single segment index would hold more segments than this.
    ///
    /// Can also be set via the `CYCLEJOIN_MAX_SEGMENTS` environment variable.
    /// Default: unlimited.
    #[arg(long, global = true, env = "CYCLEJOIN_MAX_SEGMENTS")]
    pub max_segments: Option<usize>,
}

#[cfg(test)]
mod tests;
