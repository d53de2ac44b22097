//! Integration tests for `cyclejoin segments`.
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
fn segments_of_a_triangle() {
    let out = Command::new(cyclejoin_bin())
        .args(["segments", fixture("triangle.net").to_str().expect("path"), "-l", "2"])
        .output()
        .expect("run cyclejoin segments");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("From 1 to 2:\n  1 3 2\n"), "stdout: {stdout}");
    assert_eq!(stdout.matches("From ").count(), 6, "stdout: {stdout}");
}

#[test]
fn segments_walk_mode_includes_closed_walks() {
    let out = Command::new(cyclejoin_bin())
        .args([
            "segments",
            fixture("triangle.net").to_str().expect("path"),
            "-l",
            "3",
            "--walk",
        ])
        .output()
        .expect("run cyclejoin segments");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert!(stdout.contains("From 1 to 1:\n"), "stdout: {stdout}");
    assert!(stdout.contains("  1 2 3 1\n"), "stdout: {stdout}");
    assert!(stdout.contains("  1 3 2 1\n"), "stdout: {stdout}");
}

#[test]
fn segments_json_counts_segments() {
    let out = Command::new(cyclejoin_bin())
        .args([
            "segments",
            fixture("square_tail.net").to_str().expect("path"),
            "-l",
            "1",
            "--no-prune",
            "-f",
            "json",
        ])
        .output()
        .expect("run cyclejoin segments");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(value["length"], 1);
    assert_eq!(value["kind"], "path");
    assert_eq!(value["segment_count"], 10);
}

#[test]
fn segments_respect_the_limit() {
    let out = Command::new(cyclejoin_bin())
        .args([
            "--max-segments",
            "5",
            "segments",
            fixture("k5.net").to_str().expect("path"),
            "-l",
            "1",
        ])
        .output()
        .expect("run cyclejoin segments");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn segments_without_header_is_exit_2() {
    let out = Command::new(cyclejoin_bin())
        .args(["segments", fixture("no_header.net").to_str().expect("path"), "-l", "1"])
        .output()
        .expect("run cyclejoin segments");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot parse"), "stderr: {stderr}");
}
