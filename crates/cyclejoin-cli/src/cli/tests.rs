#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::{CommandFactory, Parser};

use super::*;

/// The root help output must contain all top-level subcommand names.
#[test]
fn test_root_help_lists_all_subcommands() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    for name in &["count", "segments", "inspect"] {
        assert!(
            help.contains(name),
            "root help should mention subcommand '{name}'"
        );
    }
}

/// The root help output must describe every global flag.
#[test]
fn test_root_help_lists_global_flags() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    let expected_flags = [
        "--format",
        "--quiet",
        "--verbose",
        "--max-file-size",
        "--max-segments",
        "--help",
        "--version",
    ];
    for flag in &expected_flags {
        assert!(
            help.contains(flag),
            "root help should mention flag '{flag}'"
        );
    }
}

/// `cyclejoin count --help` must mention the split and graph flags.
#[test]
fn test_count_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("count")
        .expect("count subcommand should exist");
    let help = format!("{}", sub.render_help());
    for flag in ["--length", "--split", "--walk", "--output", "--directed", "--no-prune"] {
        assert!(help.contains(flag), "count help should mention {flag}");
    }
    assert!(help.contains("FILE"), "count help should mention FILE");
}

#[test]
fn test_clap_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_count_collects_repeated_splits() {
    let cli = Cli::try_parse_from([
        "cyclejoin", "count", "g.net", "-l", "5", "--split", "2,3", "--split", "1,2,2",
    ])
    .expect("valid arguments");
    match cli.command {
        Command::Count { split, length, .. } => {
            assert_eq!(length, 5);
            assert_eq!(split, vec!["2,3".to_owned(), "1,2,2".to_owned()]);
        }
        _ => panic!("expected count"),
    }
}

#[test]
fn test_dash_means_stdin() {
    let cli = Cli::try_parse_from(["cyclejoin", "inspect", "-"]).expect("valid arguments");
    match cli.command {
        Command::Inspect { graph } => assert!(matches!(graph.file, PathOrStdin::Stdin)),
        _ => panic!("expected inspect"),
    }
}

#[test]
fn test_walk_conflicts_with_split() {
    let result = Cli::try_parse_from([
        "cyclejoin", "count", "g.net", "-l", "4", "--walk", "--split", "2,2",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_zero_length_is_rejected() {
    let result = Cli::try_parse_from(["cyclejoin", "segments", "g.net", "-l", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["cyclejoin", "-q", "-v", "inspect", "g.net"]);
    assert!(result.is_err());
}
