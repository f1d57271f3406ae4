// Integration tests for Proximity Filter

use proximity_filter::core::{Pipeline, PipelineError, RunSummary};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const SAMPLE: &str = concat!(
    r#"{"latitude": "52.986375", "user_id": 12, "name": "Christina McArdle", "longitude": "-6.043701"}"#,
    "\n",
    r#"{"latitude": "0.0", "user_id": 1, "name": "Far Away", "longitude": "0.0"}"#,
    "\n",
    r#"{"latitude": 53.3, "user_id": 5, "name": "Near Base", "longitude": -6.26}"#,
    "\n",
);

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_proximity-filter"))
        .args(args)
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_FORMAT")
        .output()
        .unwrap()
}

#[test]
fn test_integration_end_to_end_pipeline() {
    let path = write_fixture("pipeline_sample.json", SAMPLE);
    let pipeline = Pipeline::default();

    let mut out = Vec::new();
    let summary = pipeline.run(&path, &mut out).unwrap();

    assert_eq!(summary, RunSummary { processed: 3, emitted: 2 });
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  5 - Near Base         \n 12 - Christina McArdle \n"
    );
}

#[test]
fn test_integration_empty_source_rejected() {
    let path = write_fixture("pipeline_empty.json", "\n\n");
    let pipeline = Pipeline::default();

    let result = pipeline.run(&path, &mut Vec::<u8>::new());
    assert!(matches!(result, Err(PipelineError::Empty { .. })));
}

#[test]
fn test_integration_invalid_field_reported_as_malformed() {
    let path = write_fixture(
        "pipeline_invalid.json",
        r#"{"latitude": "north", "user_id": 1, "name": "x", "longitude": "0"}"#,
    );
    let pipeline = Pipeline::default();

    let error = pipeline.run(&path, &mut Vec::<u8>::new()).unwrap_err();
    assert!(matches!(error, PipelineError::Malformed { .. }));
    assert!(error.to_string().ends_with("contains malformed data"));
}

#[test]
fn test_cli_reports_nearby_records() {
    let path = write_fixture("cli_sample.json", SAMPLE);
    let output = run_cli(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["  5 - Near Base         ", " 12 - Christina McArdle "]);
}

#[test]
fn test_cli_show_distance() {
    let path = write_fixture("cli_sample_distance.json", SAMPLE);
    let output = run_cli(&[path.to_str().unwrap(), "--show-distance"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("  5 - Near Base          (4.25 km)\n"));
}

#[test]
fn test_cli_no_qualifying_records_succeeds() {
    let path = write_fixture(
        "cli_far.json",
        r#"{"latitude": 0, "user_id": 1, "name": "Far Away", "longitude": 0}"#,
    );
    let output = run_cli(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_empty_file() {
    let path = write_fixture("cli_empty.json", "");
    let output = run_cli(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No records in file"));
}

#[test]
fn test_cli_missing_file() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("cli_does_not_exist.json");
    let output = run_cli(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_cli_malformed_file() {
    let path = write_fixture("cli_malformed.json", "{\"user_id\": 1,\n");
    let output = run_cli(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed data"));
}

#[test]
fn test_cli_error_reported_once_at_default_level() {
    let path = write_fixture("cli_malformed_once.json", "not json\n");
    let output = run_cli(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("contains malformed data").count(), 1);
    assert!(!stderr.contains("ERROR"));
    assert!(!stderr.contains("Malformed {"));
}

#[test]
fn test_cli_non_numeric_coordinate_aborts() {
    let path = write_fixture(
        "cli_nan.json",
        concat!(
            r#"{"latitude": 53.3, "user_id": 1, "name": "Near Base", "longitude": -6.26}"#,
            "\n",
            r#"{"latitude": "NaN", "user_id": 2, "name": "Broken", "longitude": -6.26}"#,
            "\n",
            r#"{"latitude": 53.3, "user_id": 3, "name": "Unreached", "longitude": -6.26}"#,
            "\n",
        ),
    );
    let output = run_cli(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "  1 - Near Base         \n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("wrong type"));
}

#[test]
fn test_cli_config_overrides_threshold() {
    let data = write_fixture("cli_config_sample.json", SAMPLE);
    let config = write_fixture("cli_threshold.toml", "[filter]\nthreshold_km = 10.0\n");
    let output = run_cli(&[data.to_str().unwrap(), "--config", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "  5 - Near Base         \n");
}

#[test]
fn test_cli_invalid_config_rejected() {
    let data = write_fixture("cli_bad_config_sample.json", SAMPLE);
    let config = write_fixture("cli_bad_reference.toml", "[reference]\nlatitude = 120.0\n");
    let output = run_cli(&[data.to_str().unwrap(), "--config", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
