//! Integration tests for the lasca binary
//!
//! Runs the built executable and checks its output.

use std::process::{Command, Output};

fn lasca(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lasca"))
        .args(args)
        .output()
        .expect("failed to run lasca")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_show_opening() {
    let output = lasca(&["show"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("bbbb/bbb/bbbb/3/wwww/www/wwww"));
    assert!(text.contains("a3-b4"));
}

#[test]
fn test_show_json_render_model() {
    let output = lasca(&["show", "--size", "6", "--json"]);
    assert!(output.status.success());
    let model: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(model["size"], 6);
    assert_eq!(model["squares"].as_array().unwrap().len(), 36);
}

#[test]
fn test_play_moves() {
    let output = lasca(&["play", "--json", "c3-d4", "e5xc3", "b2xd4"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["pgn"], "1. c3-d4 e5xc3 2. b2xd4");
    assert_eq!(report["status"], "InProgress");
}

#[test]
fn test_play_rejects_illegal_move() {
    let output = lasca(&["play", "c3-d4", "a5-b4"]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("a5-b4"));
}

#[test]
fn test_perft() {
    let output = lasca(&["perft", "--depth", "1"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "perft 1: 6");
}

#[test]
fn test_selfplay_json() {
    let output = lasca(&["selfplay", "--games", "2", "--seed", "5", "--json"]);
    assert!(output.status.success());
    let results: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(results["games"].as_array().unwrap().len(), 2);
}

#[test]
fn test_rules_file() {
    let path = std::env::temp_dir().join(format!("lasca-cli-rules-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"size": 6, "capture_rule": "Longest"}"#).unwrap();
    let output = lasca(&["--rules", path.to_str().unwrap(), "show"]);
    std::fs::remove_file(&path).ok();
    assert!(output.status.success());
    assert!(stdout(&output).contains("bbb/bbb/3/3/www/www"));
}
