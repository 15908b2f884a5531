//! Integration tests for `rutkit format`, `normalize`, `split` and
//! `check-digit`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

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

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

// ── format ───────────────────────────────────────────────────────────────────

#[test]
fn format_prints_display_form() {
    let out = rutkit(&["format", "123456789", "12345670k"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "12.345.678-9\n12.345.670-K\n");
}

#[test]
fn format_passes_short_input_through() {
    let out = rutkit(&["format", "1"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "1\n");
}

#[test]
fn format_json_reports_validity() {
    let out = rutkit(&["--format", "json", "format", "12.345.678-9"]);
    let v: serde_json::Value = serde_json::from_str(stdout(&out).trim()).expect("json");
    assert_eq!(v["output"], "12.345.678-9");
    assert_eq!(v["valid"], false);
}

// ── normalize ────────────────────────────────────────────────────────────────

#[test]
fn normalize_prints_storage_form() {
    let out = rutkit(&["normalize", "12.345.678-5", "1.234.567-4"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "12345678-5\n1234567-4\n");
}

// ── split ────────────────────────────────────────────────────────────────────

#[test]
fn split_prints_body_and_check() {
    let out = rutkit(&["--format", "json", "split", "12.345.678-5"]);
    let v: serde_json::Value = serde_json::from_str(stdout(&out).trim()).expect("json");
    assert_eq!(v["body"], "12345678");
    assert_eq!(v["check"], "5");
}

// ── check-digit ──────────────────────────────────────────────────────────────

#[test]
fn check_digit_prints_one_char_per_body() {
    let out = rutkit(&["check-digit", "12345678", "76543210", "12345670"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "5\n3\nK\n");
}

#[test]
fn check_digit_without_digits_exits_1() {
    let out = rutkit(&["check-digit", "abc"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no digits"), "stderr: {stderr}");
}
