//! Interactive menu tests driven through stdin
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests
//!
//! Covers the start screen, add/save flow, plots and robustness to bad input

use predicates::prelude::*;
use std::fs;

#[test]
fn test_create_add_and_save() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pendulab");
    cmd.arg("--data-dir")
        .arg(dir.path())
        .write_stdin("1\nweek3\n1\n100\n20.1, 20.3, 19.9\n10\ny\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You created a new data set called week3"))
        .stdout(predicate::str::contains("Data has been saved."))
        .stdout(predicate::str::contains("File has been successfully saved."))
        .stdout(predicate::str::contains("Session ended."));

    let saved = fs::read_to_string(dir.path().join("week3.csv")).unwrap();
    assert_eq!(
        saved,
        "length,trials,periods,avgPeriod,stdError\n100,20.1; 20.3; 19.9,10,2.01,0.01155\n"
    );
}

#[test]
fn test_open_existing_and_append() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lab.csv"),
        "length,trials,periods,avgPeriod,stdError\n100,20.1; 20.3,10,2.02,0.01\n",
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pendulab");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("--open")
        .arg("lab")
        .write_stdin("1\n50\n14.2, 14.1\n10\ny\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The data set has been successfully loaded from CSV file.",
        ));

    let saved = fs::read_to_string(dir.path().join("lab.csv")).unwrap();
    assert_eq!(saved.lines().count(), 3);
    assert!(saved.contains("50,14.2; 14.1,10,"));
}

#[test]
fn test_plot_series_printed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lab.csv"),
        "length,trials,periods,avgPeriod,stdError\n100,20.1; 20.3,10,2.02,0.01\n25,10.0; 10.2,10,1.01,0.01\n",
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pendulab");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("-o")
        .arg("lab")
        .write_stdin("21\n22\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("lab: Length vs Period"))
        .stdout(predicate::str::contains("lab: sqrt[Length] vs Period"))
        .stdout(predicate::str::contains("Exiting without saving."));
}

#[test]
fn test_bad_input_does_not_crash() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pendulab");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("--new")
        .arg("scratch")
        .write_stdin("1\nnot-a-number\nxyz\n1\n100\n20.1\n-\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid length 'not-a-number'"))
        .stdout(predicate::str::contains("Unknown option 'xyz'"))
        .stdout(predicate::str::contains("Invalid number of periods '-'"));

    assert!(!dir.path().join("scratch.csv").exists());
}

#[test]
fn test_open_missing_data_set_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pendulab");
    cmd.arg("-d")
        .arg(dir.path())
        .arg("--open")
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open data set 'nope'"));
}

#[test]
fn test_end_of_input_at_start_screen() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pendulab");
    cmd.arg("-d")
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session ended."));
}
