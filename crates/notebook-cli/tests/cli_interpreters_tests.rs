//! CLI interpreter command tests
//!
//! These tests run the built `notebook` binary against a temporary
//! configuration file.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const CONFIG: &str = r#"
[apps]
installed = ["hive", "impala", "spark", "oozie", "jobsub"]

[notebook]
app_blacklist = ["impala"]
interpreters_shown_on_wheel = "pyspark,java"

[[notebook.interpreters]]
key = "pyspark"
name = "PySpark"
interface = "livy"

[[notebook.interpreters]]
key = "phoenix"
name = "Phoenix"
interface = "sqlalchemy"
"#;

fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("notebook.toml");
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str], config: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_notebook"))
        .args(args)
        .arg("--config")
        .arg(config)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn first_column(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| line.split('\t').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_list_prints_resolved_order() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, CONFIG);

    let output = run(&["interpreters", "list"], &config);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        first_column(&output),
        vec!["hive", "java", "spark2", "mapreduce", "shell", "sqoop1", "distcp", "pyspark", "phoenix"]
    );
}

#[test]
fn test_list_wheel_and_wheel_first() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, CONFIG);

    let wheel = run(&["interpreters", "list", "--wheel"], &config);
    assert!(wheel.status.success());
    assert_eq!(first_column(&wheel), vec!["pyspark", "java"]);

    let wheel_first = run(&["interpreters", "list", "--wheel-first"], &config);
    assert!(wheel_first.status.success());
    let keys = first_column(&wheel_first);
    assert_eq!(&keys[..3], &["pyspark", "java", "hive"]);
    assert_eq!(keys.len(), 9);
}

#[test]
fn test_list_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, CONFIG);

    let output = run(&["interpreters", "list", "--json"], &config);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = value.as_array().unwrap();
    assert_eq!(list.len(), 9);
    assert_eq!(list[0]["type"], "hive");
    assert_eq!(list[0]["displayName"], "Hive");
    assert_eq!(list[8]["type"], "phoenix");
}

#[test]
fn test_default_prefers_wheel() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, CONFIG);

    let output = run(&["interpreters", "default"], &config);
    assert!(output.status.success());
    assert_eq!(first_column(&output), vec!["pyspark"]);
}

#[test]
fn test_show_known_and_unknown_key() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, CONFIG);

    let output = run(&["interpreters", "show", "phoenix"], &config);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["interface"], "sqlalchemy");

    // impala is blacklisted, so it is not resolved
    let missing = run(&["interpreters", "show", "impala"], &config);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_missing_config_reports_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("absent.toml");

    let output = run(&["interpreters", "list"], &config);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_IO"));
}

#[test]
fn test_invalid_config_reports_invalid_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, "[notebook\n");

    let output = run(&["interpreters", "list"], &config);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
}
