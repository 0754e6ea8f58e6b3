//! Corruption recovery tests for the fitlog binary.
//!
//! These tests verify the system can handle:
//! - Corrupted lines in the entries file
//! - A partial last line left by an interrupted write
//! - A corrupted owners file

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as IoWrite;
use std::path::Path;
use tempfile::TempDir;

const ONE_WORKOUT: &str = "#Back\n#Row\n#4sets8reps\n#40kg\n#12min";

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fitlog").expect("Failed to find fitlog binary");
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    cli(temp_dir.path())
        .args(["user", "add", "ana"])
        .assert()
        .success();
    temp_dir
}

fn dashboard_json(dir: &Path) -> serde_json::Value {
    let output = cli(dir)
        .args(["--user", "ana", "dashboard"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_corrupted_entry_lines_are_skipped() {
    let temp_dir = setup_test_dir();
    let entries_path = temp_dir.path().join("data/entries.jsonl");
    fs::write(&entries_path, "{ invalid json }\n{ more invalid }\n")
        .expect("Failed to write corrupted entries");

    cli(temp_dir.path())
        .args(["--user", "ana", "log"])
        .write_stdin(ONE_WORKOUT)
        .assert()
        .success();

    let json = dashboard_json(temp_dir.path());
    assert_eq!(json["totalWorkouts"], 1);
    assert_eq!(json["totalCaloriesBurnt"], 12 * 5 * 40);
}

#[test]
fn test_partial_last_line() {
    let temp_dir = setup_test_dir();
    let entries_path = temp_dir.path().join("data/entries.jsonl");

    // Simulate a crash in the middle of a write
    let mut file = fs::File::create(&entries_path).unwrap();
    write!(file, r#"{{"id":"partial"#).unwrap();
    drop(file);

    let two = format!("{};{}", ONE_WORKOUT, ONE_WORKOUT);
    cli(temp_dir.path())
        .args(["--user", "ana", "log"])
        .write_stdin(two)
        .assert()
        .success();

    let json = dashboard_json(temp_dir.path());
    assert_eq!(json["totalWorkouts"], 2);
    assert_eq!(json["totalCaloriesBurnt"], 2 * 12 * 5 * 40);
}

#[test]
fn test_corrupted_owners_file_is_unavailable() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("data/owners.json"), "[ \"ana\", ")
        .expect("Failed to write corrupted owners");

    cli(temp_dir.path())
        .args(["--user", "ana", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn test_missing_data_dir_is_created() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    cli(temp_dir.path())
        .args(["user", "add", "ana"])
        .assert()
        .success();

    assert!(temp_dir.path().join("data/owners.json").exists());
}
