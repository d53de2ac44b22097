#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod canonical;
pub mod config;
pub mod cycle_set;
pub mod error;
pub mod graph;
pub mod join;
pub mod pajek;
pub mod pipeline;
pub mod segments;

pub use canonical::{CanonicalCycle, canonicalize};
pub use config::JoinConfig;
pub use cycle_set::CycleSet;
pub use error::CycleError;
pub use graph::{Graph, Vertex};
pub use join::{JoinOutcome, JoinStats, MAX_ARITY, MIN_ARITY, is_simple_cycle, join, wrap};
pub use pajek::{PajekError, parse as parse_pajek};
pub use pipeline::{IndexCache, find_cycles};
pub use segments::{
    EndpointIndex, EndpointKey, SegmentId, SegmentKind, build_index, build_index_with_limit,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
