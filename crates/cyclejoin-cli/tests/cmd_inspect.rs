//! Integration tests for `cyclejoin inspect`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `cyclejoin` binary.
fn cyclejoin_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("cyclejoin");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

#[test]
fn inspect_prunes_by_default() {
    let out = Command::new(cyclejoin_bin())
        .args(["inspect", fixture("square_tail.net").to_str().expect("path")])
        .output()
        .expect("run cyclejoin inspect");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("vertices:       6"), "stdout: {stdout}");
    assert!(stdout.contains("active:         4"), "stdout: {stdout}");
    assert!(stdout.contains("edges:          4"), "stdout: {stdout}");
    assert!(stdout.contains("pruned_edges:   1"), "stdout: {stdout}");
}

#[test]
fn inspect_no_prune_json() {
    let out = Command::new(cyclejoin_bin())
        .args([
            "inspect",
            "--no-prune",
            "-f",
            "json",
            fixture("square_tail.net").to_str().expect("path"),
        ])
        .output()
        .expect("run cyclejoin inspect");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(value["edge_count"], 5);
    assert_eq!(value["pruned_edges"], 0);
    assert_eq!(value["degree_histogram"]["3"], 1);
    assert_eq!(value["degree_histogram"]["1"], 1);
}

#[test]
fn inspect_skips_invalid_edges_with_a_warning() {
    let out = Command::new(cyclejoin_bin())
        .args(["inspect", fixture("invalid_edge.net").to_str().expect("path")])
        .output()
        .expect("run cyclejoin inspect");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("edges:          4"), "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("skipping invalid edge: 9 1"), "stderr: {stderr}");
}

#[test]
fn inspect_quiet_hides_warnings() {
    let out = Command::new(cyclejoin_bin())
        .args(["-q", "inspect", fixture("invalid_edge.net").to_str().expect("path")])
        .output()
        .expect("run cyclejoin inspect");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn inspect_directed_counts_arcs() {
    let out = Command::new(cyclejoin_bin())
        .args([
            "inspect",
            "--directed",
            "-f",
            "json",
            fixture("directed.net").to_str().expect("path"),
        ])
        .output()
        .expect("run cyclejoin inspect");
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(value["directed"], true);
    assert_eq!(value["edge_count"], 5);
}
