//! Executable tests for `coverage-cli`.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn cli_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_coverage-cli"))
}

fn run_cli(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(cli_path())
        .args(args)
        .env_remove("COVERAGE_CONFIG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|err| panic!("failed to spawn {}: {err}", cli_path().display()));
    // Commands that fail before reading stdin may close the pipe first.
    if let Err(err) = child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
    {
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe, "write stdin: {err}");
    }
    child.wait_with_output().expect("wait for coverage-cli")
}

fn parse_stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not valid JSON: {e}\nstdout={}\nstderr={}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

const HOUSEHOLD: &str = r#"{"homeValue": "200000", "vehicleValue": "20000",
    "savingsValue": "30000", "incomeValue": "50000", "currentCoverage": "50/100"}"#;

#[test]
fn test_estimate_prints_report() {
    let output = run_cli(&["estimate"], HOUSEHOLD);
    assert_eq!(output.status.code(), Some(0));

    let json = parse_stdout_json(&output);
    assert_eq!(json["exposure"], 300_000.0);
    assert_eq!(json["exposureDisplay"], "$300,000");
    assert_eq!(json["recommendation"], "100/300");
    assert_eq!(json["gapCategory"], "adequate");
    assert_eq!(json["gapAnalysis"], "Insufficient coverage");
    assert_eq!(json["currentCoverageLimit"], 50_000);
    assert_eq!(json["reference"].as_str().map(str::len), Some(16));
}

#[test]
fn test_estimate_huge_values_stay_numeric() {
    let form = r#"{"homeValue": "1e308", "vehicleValue": "1e308",
        "savingsValue": "0", "incomeValue": "0", "currentCoverage": "Not sure"}"#;
    let output = run_cli(&["estimate"], form);
    assert_eq!(output.status.code(), Some(0));

    let json = parse_stdout_json(&output);
    let exposure = json["exposure"].as_f64().expect("exposure is a number");
    assert!(exposure.is_finite() && exposure > 1e308, "{exposure}");
    assert_eq!(json["recommendation"], "500/500 + $1M Umbrella");
    let display = json["exposureDisplay"].as_str().expect("display string");
    assert!(!display.contains('∞'), "{display}");
}

#[test]
fn test_estimate_rejects_missing_required_fields() {
    let output = run_cli(&["estimate"], r#"{"homeValue": "1000"}"#);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please fill in all required fields."), "{stderr}");
}

#[test]
fn test_malformed_form_is_an_error() {
    let output = run_cli(&["estimate"], "not json");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_email_composes_mailto() {
    let output = run_cli(
        &["email", "--name", "Pat Doe", "--email", "pat@example.com"],
        HOUSEHOLD,
    );
    assert_eq!(output.status.code(), Some(0));

    let json = parse_stdout_json(&output);
    assert_eq!(json["subject"], "MyProtection Number Results - Pat Doe");
    assert_eq!(json["recipient"], "Tre.Scott@countryfinancial.com");
    let mailto = json["mailto"].as_str().expect("mailto string");
    assert!(mailto.starts_with("mailto:Tre.Scott@countryfinancial.com?subject="));
    assert_eq!(json["estimate"]["recommendation"], "100/300");
}

#[test]
fn test_email_requires_contact_details() {
    let output = run_cli(&["email", "--name", "Pat Doe"], HOUSEHOLD);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_book_prints_default_url() {
    let output = run_cli(&["book"], "");
    assert_eq!(output.status.code(), Some(0));
    let json = parse_stdout_json(&output);
    let url = json["bookingUrl"].as_str().expect("bookingUrl string");
    assert!(url.starts_with("https://outlook.office365.com/book/"), "{url}");
}

#[test]
fn test_tiers_lists_five_bands_and_eight_labels() {
    let output = run_cli(&["tiers"], "");
    assert_eq!(output.status.code(), Some(0));
    let json = parse_stdout_json(&output);
    let recommended = json["recommended"].as_array().expect("recommended array");
    assert_eq!(recommended.len(), 5);
    assert_eq!(recommended[0]["maxExposure"], 60_000.0);
    assert!(recommended[4]["maxExposure"].is_null());
    assert_eq!(json["current"].as_array().map(Vec::len), Some(8));
}

#[test]
fn test_bad_config_fails_closed() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("coverage_cli_bad_config_{}.json", std::process::id()));
    std::fs::write(&path, r#"{"limits_30_60_max": -1}"#).expect("write config");

    let output = run_cli(
        &["--config", path.to_str().expect("utf8 path"), "estimate"],
        HOUSEHOLD,
    );
    let _ = std::fs::remove_file(&path);
    assert_eq!(output.status.code(), Some(2));
}
