//! Integration tests for the `trafficminer` binary.

mod common;

use assert_cmd::Command;
use common::fixture;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Command running in an empty directory so no `.trafficminer.toml` is picked up.
fn trafficminer(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trafficminer").unwrap();
    cmd.current_dir(dir.path())
        .env("TRAFFICMINER_QUIET", "1")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Vec<Value> {
    serde_json::from_slice(&output.stdout).expect("stdout is not a JSON array")
}

#[test]
fn test_har_extraction_as_json() {
    let dir = TempDir::new().unwrap();
    let output = trafficminer(&dir)
        .args(["extract", "--format", "json"])
        .arg(fixture("sample.har"))
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let records = stdout_json(&output);
    let summary: Vec<(&str, &str, Option<&str>)> = records
        .iter()
        .map(|r| {
            (
                r["method"].as_str().unwrap(),
                r["url"].as_str().unwrap(),
                r["graphql_operation_name"].as_str(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("GET", "https://api.shop.test/v1/products?page=1", None),
            ("POST", "https://api.shop.test/graphql", Some("GetCart")),
            ("POST", "https://api.shop.test/graphql", Some("AddItem")),
            ("POST", "https://api.shop.test/v1/orders", None),
        ]
    );
    assert_eq!(records[2]["graphql_operation_type"], "mutation");
    assert_eq!(records[3]["status_code"], 201);
    assert!(records[3]["response_body"].is_null());
}

#[test]
fn test_terminal_summary() {
    let dir = TempDir::new().unwrap();
    let output = trafficminer(&dir)
        .arg("extract")
        .arg(fixture("sample.har"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("QUERY GetCart"));
    assert!(stdout.contains("MUTATION AddItem"));
    assert!(stdout.contains("REST API"));
    assert!(stdout.contains("Found 4 unique operations from 8 total history items"));
}

#[test]
fn test_toggles_and_scope_flags() {
    let dir = TempDir::new().unwrap();
    let output = trafficminer(&dir)
        .args(["extract", "-f", "json", "--no-graphql", "--scope", "*.shop.test"])
        .args(["--exclude", "https://api.shop.test/v1/orders*"])
        .arg(fixture("sample.har"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let records = stdout_json(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0]["url"],
        "https://api.shop.test/v1/products?page=1"
    );
}

#[test]
fn test_config_file_supplies_filters() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".trafficminer.toml"),
        "[filters]\ninclude_rest = false\n\n[output]\ndefault_format = \"json\"\n",
    )
    .unwrap();

    let output = trafficminer(&dir)
        .arg("extract")
        .arg(fixture("sample.har"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let records = stdout_json(&output);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| !r["graphql_operation_type"].is_null()));
}

#[test]
fn test_capture_file_decodes_latin1() {
    let dir = TempDir::new().unwrap();
    let output = trafficminer(&dir)
        .args(["extract", "-f", "json"])
        .arg(fixture("sample_capture.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let records = stdout_json(&output);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["graphql_operation_name"], "Balance");
    assert_eq!(records[1]["method"], "PUT");
    assert_eq!(records[1]["status_code"], 204);
    assert_eq!(records[1]["request_body"]["nickname"], "café");
    assert_eq!(records[2]["response_body"]["nickname"], "café");
}

#[test]
fn test_export_writes_file() {
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("ops.json");
    let output = trafficminer(&dir)
        .args(["extract", "-o"])
        .arg(&export)
        .arg(fixture("sample.har"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let exported: Vec<Value> = serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(exported.len(), 4);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Exported 4 operations"));
}

#[test]
fn test_empty_result_is_not_exported() {
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("ops.json");
    let output = trafficminer(&dir)
        .args(["extract", "--no-graphql", "--no-rest", "-o"])
        .arg(&export)
        .arg(fixture("sample.har"))
        .output()
        .unwrap();
    assert!(output.status.success());

    assert!(!export.exists());
    assert!(String::from_utf8_lossy(&output.stdout)
        .contains("No unique operations found matching the selected criteria."));
}

#[test]
fn test_unreadable_history_fails() {
    let dir = TempDir::new().unwrap();
    let output = trafficminer(&dir)
        .arg("extract")
        .arg(fixture("broken_capture.json"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not base64"), "{stderr}");
}

#[test]
fn test_missing_history_fails() {
    let dir = TempDir::new().unwrap();
    let output = trafficminer(&dir)
        .args(["extract", "does-not-exist.har"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read"));
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();
    trafficminer(&dir).arg("init").assert().success();
    assert!(dir.path().join(".trafficminer.toml").exists());

    trafficminer(&dir).arg("init").assert().failure();
    trafficminer(&dir).args(["init", "--force"]).assert().success();
}
