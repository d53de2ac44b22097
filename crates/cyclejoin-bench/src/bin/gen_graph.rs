//! Writes the size-tier graphs as Pajek files for manual CLI runs.
//!
//! Files land in `target/bench-fixtures/<tier>-<seed>.net`.

use std::error::Error;
use std::fs;

use cyclejoin_bench::{SizeTier, fixtures_dir, generate_graph, to_pajek};

fn main() -> Result<(), Box<dyn Error>> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => 42,
    };
    let dir = fixtures_dir();
    fs::create_dir_all(&dir)?;

    for tier in [SizeTier::Small, SizeTier::Medium, SizeTier::Large] {
        let graph = generate_graph(&tier.config(seed));
        let path = dir.join(format!("{}-{seed}.net", tier.label()));
        fs::write(&path, to_pajek(&graph))?;
        eprintln!(
            "{}: {} vertices, {} edges -> {}",
            tier.label(),
            graph.vertex_count(),
            graph.edge_count(),
            path.display()
        );
    }
    Ok(())
}
