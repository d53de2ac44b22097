//! Implementation of `cyclejoin count <file> --length L`.
//!
//! Runs one search per requested split (or the even split when none is
//! given), sharing segment indexes between splits that need the same length.
//! Each index is released as soon as no later split needs it.
//!
//! In human mode one line per split is printed, e.g. `L=5 split=[2,3]
//! cycles=12`. In `--format json` mode a single object is emitted.
use std::collections::BTreeMap;
use std::path::Path;

use cyclejoin_core::{IndexCache, JoinConfig, JoinStats, find_cycles};
use serde::Serialize;

use crate::error::CliError;
use crate::io::{load_graph, stdout_error, write_cycles};
use crate::{Cli, GraphArgs, OutputFormat};

/// Options of the `count` subcommand beyond the graph input.
pub struct CountOptions<'a> {
    pub length: u32,
    pub splits: &'a [String],
    pub walk: bool,
    pub output: Option<&'a Path>,
}

/// Result of one split.
#[derive(Debug, Serialize)]
pub struct SplitResult {
    pub split: Vec<usize>,
    pub walk: bool,
    pub cycles: usize,
    pub stats: JoinStats,
}

/// Everything `count` reports.
#[derive(Debug, Serialize)]
pub struct CountReport {
    pub length: usize,
    pub directed: bool,
    pub pruned_edges: usize,
    pub segments_enumerated: usize,
    pub results: Vec<SplitResult>,
}

/// Turns the command-line split options into validated configurations.
///
/// # Errors
///
/// Returns [`CliError::InvalidConfiguration`] for a split that does not
/// describe `length`.
pub fn configs(length: usize, splits: &[String], walk: bool) -> Result<Vec<JoinConfig>, CliError> {
    if walk {
        return Ok(vec![JoinConfig::wrap(length)?]);
    }
    if splits.is_empty() {
        return Ok(vec![JoinConfig::even_split(length)?]);
    }
    splits
        .iter()
        .map(|split| JoinConfig::parse(length, split).map_err(CliError::from))
        .collect()
}

/// Runs the `count` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the graph cannot be loaded or
/// the cycle file cannot be written, and exit code 1 if a split is invalid
/// or the segment limit is exceeded.
pub fn run(graph_args: &GraphArgs, options: &CountOptions<'_>, cli: &Cli) -> Result<(), CliError> {
    let length = options.length as usize;
    let configs = configs(length, options.splits, options.walk)?;
    let loaded = load_graph(graph_args, cli.max_file_size)?;
    let graph = &loaded.graph;

    // Position of the last split that needs each index.
    let mut last_use = BTreeMap::new();
    for (position, config) in configs.iter().enumerate() {
        for length in config.distinct_lengths() {
            last_use.insert((length, config.segment_kind()), position);
        }
    }

    let mut cache = IndexCache::with_limit(cli.max_segments);
    let mut results = Vec::with_capacity(configs.len());
    let mut exported = None;
    for (position, config) in configs.iter().enumerate() {
        let outcome = find_cycles(graph, config, &mut cache)?;
        log::debug!(
            "{config}: {} cycles from {} candidates ({} accepted, {} duplicates)",
            outcome.count(),
            outcome.stats.candidates,
            outcome.stats.accepted,
            outcome.stats.duplicates
        );
        for (&key, _) in last_use.iter().filter(|&(_, &last)| last == position) {
            let (length, kind) = key;
            cache.release(length, kind);
        }

        results.push(SplitResult {
            split: config.lengths().to_vec(),
            walk: config.is_wrap(),
            cycles: outcome.count(),
            stats: outcome.stats,
        });
        if exported.is_none() && options.output.is_some() {
            exported = Some(outcome.cycles.into_sorted_vec());
        }
    }

    if let (Some(path), Some(cycles)) = (options.output, exported) {
        write_cycles(path, &cycles)?;
        log::debug!("wrote {} cycles to {}", cycles.len(), path.display());
    }

    let report = CountReport {
        length,
        directed: graph.is_directed(),
        pruned_edges: loaded.pruned_edges,
        segments_enumerated: cache.segments_enumerated(),
        results,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => print_human(&mut out, &report),
        OutputFormat::Json => print_json(&mut out, &report),
    }
    .map_err(|e| stdout_error(&e))
}

fn print_human<W: std::io::Write>(w: &mut W, report: &CountReport) -> std::io::Result<()> {
    for result in &report.results {
        if result.walk {
            writeln!(w, "L={} walk cycles={}", report.length, result.cycles)?;
        } else {
            let split: Vec<String> = result.split.iter().map(ToString::to_string).collect();
            writeln!(
                w,
                "L={} split=[{}] cycles={}",
                report.length,
                split.join(","),
                result.cycles
            )?;
        }
    }
    Ok(())
}

fn print_json<W: std::io::Write>(w: &mut W, report: &CountReport) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, report).map_err(std::io::Error::other)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn report() -> CountReport {
        CountReport {
            length: 5,
            directed: false,
            pruned_edges: 0,
            segments_enumerated: 60,
            results: vec![
                SplitResult {
                    split: vec![2, 3],
                    walk: false,
                    cycles: 12,
                    stats: JoinStats::default(),
                },
                SplitResult {
                    split: vec![5],
                    walk: true,
                    cycles: 12,
                    stats: JoinStats::default(),
                },
            ],
        }
    }

    #[test]
    fn configs_default_to_even_split() {
        let configs = configs(5, &[], false).expect("valid");
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].lengths(), &[2, 3]);
    }

    #[test]
    fn configs_parse_every_split() {
        let splits = vec!["1,4".to_owned(), "1,2,2".to_owned()];
        let configs = configs(5, &splits, false).expect("valid");
        assert_eq!(configs[1].lengths(), &[1, 2, 2]);
    }

    #[test]
    fn configs_reject_a_bad_split() {
        let splits = vec!["2,2".to_owned()];
        let err = configs(5, &splits, false).expect_err("sums to 4");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn walk_config_is_a_single_segment() {
        let configs = configs(4, &[], true).expect("valid");
        assert!(configs[0].is_wrap());
    }

    #[test]
    fn human_output_has_one_line_per_split() {
        let mut buf = Vec::new();
        print_human(&mut buf, &report()).expect("write");
        let text = String::from_utf8(buf).expect("utf-8");
        assert_eq!(text, "L=5 split=[2,3] cycles=12\nL=5 walk cycles=12\n");
    }

    #[test]
    fn json_output_is_an_object() {
        let mut buf = Vec::new();
        print_json(&mut buf, &report()).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["results"][0]["cycles"], 12);
        assert_eq!(value["results"][0]["split"], serde_json::json!([2, 3]));
        assert_eq!(value["segments_enumerated"], 60);
    }
}
