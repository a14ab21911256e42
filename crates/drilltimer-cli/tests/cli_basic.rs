//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs. None of them touch the
//! config file.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_drilltimer"))
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(args);
    assert_eq!(code, 0, "CLI command failed: {args:?}: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_variant_list() {
    let (stdout, _, code) = run_cli(&["variant", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("fall"));
    assert!(stdout.contains("fx"));
    assert!(stdout.contains("luft-orgs"));
}

#[test]
fn test_variant_list_json() {
    let json = run_json(&["variant", "list", "--json"]);
    assert_eq!(json.as_array().map(|a| a.len()), Some(3));
}

#[test]
fn test_variant_show() {
    let json = run_json(&["variant", "show", "luft-orgs"]);
    assert_eq!(json["mode"], "modulo");
    assert_eq!(json["ceiling"], 75);
    assert_eq!(json["wrap_cue"], "bell");
    assert_eq!(json["table"][0]["second"], 60);
}

#[test]
fn test_variant_show_unknown() {
    let (_, stderr, code) = run_cli(&["variant", "show", "rings"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown timer variant"));
}

#[test]
fn test_status_at_threshold() {
    let json = run_json(&["status", "fall", "--elapsed", "30"]);
    assert_eq!(json["advance"]["cue"], "bell");
    assert_eq!(json["advance"]["terminal"], false);
    assert_eq!(json["snapshot"]["type"], "state_snapshot");
    assert_eq!(json["snapshot"]["deduction"], "-0.3");
    assert_eq!(json["snapshot"]["next_event"]["in_secs"], 30);
}

#[test]
fn test_status_at_ceiling_is_terminal() {
    let json = run_json(&["status", "fall", "--elapsed", "120"]);
    assert_eq!(json["advance"]["cue"], serde_json::Value::Null);
    assert_eq!(json["advance"]["terminal"], true);
}

#[test]
fn test_status_modulo_wrap() {
    let json = run_json(&["status", "luft-orgs", "--elapsed", "75"]);
    assert_eq!(json["advance"]["cue"], "bell");
    assert_eq!(json["snapshot"]["phase_secs"], 0);
    assert_eq!(json["snapshot"]["display_time"], "00:01:15");
}

#[test]
fn test_status_rejects_negative_elapsed() {
    let (_, stderr, code) = run_cli(&["status", "fall", "--elapsed", "-5"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("must not be negative"));
}

#[test]
fn test_simulate_fall() {
    let (stdout, stderr, code) = run_cli(&["simulate", "fall"]);
    assert_eq!(code, 0, "simulate failed: {stderr}");

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("Failed to parse JSON line"))
        .collect();
    let cues: Vec<u64> = events
        .iter()
        .filter(|e| e["type"] == "cue_fired")
        .filter_map(|e| e["elapsed_secs"].as_u64())
        .collect();
    assert_eq!(cues, vec![10, 20, 30, 60]);
    assert_eq!(events.first().map(|e| e["type"].clone()), Some("timer_started".into()));
    assert_eq!(events.last().map(|e| e["type"].clone()), Some("timer_finished".into()));
}

#[test]
fn test_simulate_until() {
    let (stdout, _, code) = run_cli(&["simulate", "luft-orgs", "--until", "150"]);
    assert_eq!(code, 0);
    let cue_count = stdout.lines().filter(|l| l.contains("cue_fired")).count();
    assert_eq!(cue_count, 6);
}

#[test]
fn test_completions() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("drilltimer"));
}
