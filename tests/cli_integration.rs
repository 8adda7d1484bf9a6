mod common;

use std::fs;

use heat_demand::pipeline::{DEFAULT_OUTPUT_FILE, DEFAULT_TEMPERATURE_FILE};

#[test]
fn missing_temperature_file_exits_cleanly_with_guidance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = common::run_cli(dir.path(), &["--no-plot"]);

    assert!(output.status.success(), "status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(DEFAULT_TEMPERATURE_FILE), "stdout: {stdout}");
    let dir_name = dir
        .path()
        .file_name()
        .and_then(|n| n.to_str())
        .expect("tempdir name");
    assert!(stdout.contains(dir_name), "stdout: {stdout}");
    assert!(!dir.path().join(DEFAULT_OUTPUT_FILE).exists());
}

#[test]
fn temperature_file_in_working_directory_is_used() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, common::HOURS_2010);

    let output = common::run_cli(dir.path(), &["--no-plot"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Annual consumption:"));
    assert!(stdout.contains("[8760 rows x 3 columns]"));

    let csv = fs::read_to_string(dir.path().join(DEFAULT_OUTPUT_FILE)).expect("output csv");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(",efh,mfh,ghd"));
    assert!(lines.next().is_some_and(|l| l.starts_with("2010-01-01 00:00:00,")));
    assert_eq!(csv.lines().count(), common::HOURS_2010 + 1);
}

#[test]
fn synthetic_run_writes_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = common::run_cli(dir.path(), &["--synthetic", "7", "--no-plot"]);

    assert!(output.status.success());
    assert!(dir.path().join(DEFAULT_OUTPUT_FILE).is_file());
}

#[test]
fn input_and_output_overrides_are_honoured() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), "other.csv", common::HOURS_2010);

    let output = common::run_cli(
        dir.path(),
        &["--input", "other.csv", "--output", "result.csv", "--no-plot"],
    );

    assert!(output.status.success());
    assert!(dir.path().join("result.csv").is_file());
    assert!(!dir.path().join(DEFAULT_OUTPUT_FILE).exists());
}

#[test]
fn scenario_file_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, common::HOURS_2010);
    let scenario = r#"
[output]
file = "office.csv"

[[buildings]]
label = "office"
shlp_type = "GBD"
annual_demand_kwh = 50000.0
"#;
    fs::write(dir.path().join("office.toml"), scenario).expect("write scenario");

    let output = common::run_cli(dir.path(), &["--scenario", "office.toml", "--no-plot"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let csv = fs::read_to_string(dir.path().join("office.csv")).expect("output csv");
    assert_eq!(csv.lines().next(), Some(",office"));
}

#[test]
fn unknown_preset_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = common::run_cli(dir.path(), &["--preset", "nope", "--no-plot"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope"), "stderr: {stderr}");
}

#[test]
fn short_temperature_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, 100);

    let output = common::run_cli(dir.path(), &["--no-plot"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join(DEFAULT_OUTPUT_FILE).exists());
}
