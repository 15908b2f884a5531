//! Integration tests for `rutkit generate` and `rutkit bmi`.
#![allow(clippy::expect_used)]

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn rutkit_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("rutkit");
    path
}

fn rutkit(args: &[&str]) -> Output {
    Command::new(rutkit_bin())
        .args(args)
        .output()
        .expect("run rutkit")
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_requested_count() {
    let out = rutkit(&["generate", "--count", "5"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 5);
}

#[test]
fn generate_same_seed_same_output() {
    let a = rutkit(&["generate", "-n", "4", "--seed", "2024"]);
    let b = rutkit(&["generate", "-n", "4", "--seed", "2024"]);
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn generated_identifiers_validate() {
    let generated = rutkit(&["generate", "-n", "20", "--seed", "1"]);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("generated.txt");
    std::fs::write(&path, &generated.stdout).expect("write ids");

    let out = rutkit(&["--quiet", "validate", path.to_str().expect("path")]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn generate_max_count_streams_without_allocating_up_front() {
    let mut child = Command::new(rutkit_bin())
        .args(["generate", "-n", &usize::MAX.to_string(), "--seed", "1"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn rutkit");
    let stdout = child.stdout.take().expect("stdout");
    let first: Vec<String> = BufReader::new(stdout)
        .lines()
        .take(3)
        .collect::<Result<_, _>>()
        .expect("read lines");
    assert_eq!(first.len(), 3);

    // Dropping the reader closes the pipe; the next write fails cleanly.
    let status = child.wait().expect("wait");
    let mut stderr = String::new();
    child
        .stderr
        .take()
        .expect("stderr")
        .read_to_string(&mut stderr)
        .expect("read stderr");
    assert_eq!(status.code(), Some(2), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// bmi
// ---------------------------------------------------------------------------

#[test]
fn bmi_human_output() {
    let out = rutkit(&["bmi", "--weight", "70", "--height", "175"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("bmi:    22.86"), "stdout: {stdout}");
    assert!(stdout.contains("class:  normal weight"), "stdout: {stdout}");
}

#[test]
fn bmi_out_of_range_warns_on_stderr() {
    let out = rutkit(&["bmi", "--weight", "200", "--height", "150"]);
    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[W] BMI 88.89 is too high"), "stderr: {stderr}");
}

#[test]
fn bmi_pregnant_json() {
    let out = rutkit(&[
        "--format", "json", "bmi", "--weight", "45", "--height", "170", "--pregnant",
    ]);
    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is one JSON object");
    assert_eq!(v["class"], "underweight");
    assert_eq!(v["pregnancy"]["min_gain_kg"], 12.5);
}

#[test]
fn bmi_zero_weight_exits_2() {
    let out = rutkit(&["bmi", "--weight", "0", "--height", "170"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid measurement"), "stderr: {stderr}");
}

#[test]
fn bmi_tiny_height_exits_2() {
    let out = rutkit(&["--format", "json", "bmi", "--weight", "70", "--height", "1e-160"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}
