//! Concurrency tests for the fitlog binary.
//!
//! These tests verify that multiple processes can safely:
//! - Submit logs to the same store simultaneously (file locking)
//! - Read statistics while other processes write

use assert_cmd::Command;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

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

/// Three blocks tagged with the batch number in their category
fn batch(i: u64) -> String {
    (0..3)
        .map(|n| format!("#batch{}\n#Move {}\n#2sets5reps\n#10kg\n#1min", i, n))
        .collect::<Vec<_>>()
        .join(";")
}

#[test]
fn test_no_interleaving_under_load() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let dir = dir.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(i * 3));
                cli(&dir)
                    .args(["--user", "ana", "log"])
                    .write_stdin(batch(i))
                    .timeout(Duration::from_secs(10))
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let content = std::fs::read_to_string(dir.join("data/entries.jsonl"))
        .expect("Failed to read entries");

    let categories: Vec<String> = content
        .lines()
        .filter(|l| !l.is_empty())
        .map(|line| {
            let value: serde_json::Value =
                serde_json::from_str(line).expect("entries file contains invalid JSON");
            value["category"].as_str().unwrap().to_string()
        })
        .collect();

    assert_eq!(categories.len(), 30, "Expected 30 entries");

    // Every batch landed as one contiguous run of three lines
    for run in categories.chunks(3) {
        assert!(
            run.iter().all(|c| c == &run[0]),
            "batch was interleaved: {:?}",
            run
        );
    }
}

#[test]
fn test_reads_during_writes() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path().to_path_buf();

    let writer_dir = dir.clone();
    let writer = thread::spawn(move || {
        for i in 0..5 {
            cli(&writer_dir)
                .args(["--user", "ana", "log"])
                .write_stdin(batch(i))
                .assert()
                .success();
        }
    });

    for _ in 0..5 {
        cli(&dir)
            .args(["--user", "ana", "dashboard"])
            .timeout(Duration::from_secs(10))
            .assert()
            .success();
        thread::sleep(Duration::from_millis(2));
    }

    writer.join().expect("Writer thread panicked");

    let output = cli(&dir)
        .args(["--user", "ana", "dashboard"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["totalWorkouts"], 15);
    // 1 min * 5 * 10 kg per entry
    assert_eq!(json["totalCaloriesBurnt"], 750);
}
