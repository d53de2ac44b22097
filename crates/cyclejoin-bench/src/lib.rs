//! Random graph generator, reference cycle enumerator and benchmark
//! utilities for `cyclejoin-core`.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, complete_graph, generate_graph, ring, to_pajek};

/// Returns the directory where generated `.net` fixtures are written.
///
/// The directory lives under `target/bench-fixtures/` so it is gitignored
/// and shared between the generator binary and manual CLI runs.
pub fn fixtures_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
}
