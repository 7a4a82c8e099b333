//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn clusters_a_csv_end_to_end() {
    let mut df = common::tightly_coupled_dataframe(200, 11);
    let (_tmp, csv_path) = common::create_temp_csv(&mut df);

    let mut cmd = Command::cargo_bin("cliq").unwrap();
    cmd.arg("--input")
        .arg(&csv_path)
        .arg("--seed")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("CLUSTER SUMMARY"))
        .stdout(predicate::str::contains("redundancy cluster"));
}

#[test]
fn exports_json_when_requested() {
    let mut df = common::tightly_coupled_dataframe(200, 11);
    let (tmp, csv_path) = common::create_temp_csv(&mut df);
    let json_path = tmp.path().join("clusters.json");

    Command::cargo_bin("cliq")
        .unwrap()
        .arg("--input")
        .arg(&csv_path)
        .arg("--seed")
        .arg("3")
        .arg("--output")
        .arg(&json_path)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&json_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(parsed["summary"]["n_features"], 3);
    assert_eq!(parsed["summary"]["n_clusters"], 1);
    let features = parsed["clusters"][0]["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    assert_eq!(parsed["metadata"]["method"], "pearson");
    assert_eq!(parsed["metadata"]["bonferroni"], true);
}

#[test]
fn rejects_unknown_method() {
    let mut df = common::tightly_coupled_dataframe(50, 1);
    let (_tmp, csv_path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("cliq")
        .unwrap()
        .arg("--input")
        .arg(&csv_path)
        .arg("--method")
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown correlation method"));
}

#[test]
fn rejects_alpha_out_of_range() {
    Command::cargo_bin("cliq")
        .unwrap()
        .arg("--input")
        .arg("whatever.csv")
        .arg("--alpha")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha must be strictly between"));
}

#[test]
fn fails_cleanly_on_missing_file() {
    Command::cargo_bin("cliq")
        .unwrap()
        .arg("--input")
        .arg("does_not_exist.csv")
        .assert()
        .failure();
}
