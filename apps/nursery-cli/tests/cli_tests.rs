use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn data_dir() -> PathBuf {
    // apps/nursery-cli -> apps -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().join("data")
}

fn nursery(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nursery").unwrap();
    cmd.env("RUST_ENV", "test")
        .arg("--config-dir")
        .arg(config_dir.path())
        .arg("--data-dir")
        .arg(data_dir());
    cmd
}

fn config_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[recent]\nstore_path = \"state/recent.json\"\n").unwrap();
    tmp
}

#[test]
fn index_reports_counts_per_type() {
    let tmp = config_dir();
    nursery(&tmp)
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"species\s+3").unwrap())
        .stdout(predicate::str::is_match(r"batch\s+4").unwrap())
        .stdout(predicate::str::is_match(r"location\s+2").unwrap());
}

#[test]
fn search_ranks_and_records_the_query() {
    let tmp = config_dir();
    let output = nursery(&tmp).args(["search", "MAN-2024", "--json"]).output().unwrap();
    assert!(output.status.success());
    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results[0]["id"], "MAN-2024-156");
    assert_eq!(results[0]["type"], "batch");
    assert!(results.as_array().unwrap().iter().all(|r| r["id"] != "KOW-2023-010"));

    nursery(&tmp).arg("recent").assert().success().stdout(predicate::str::contains("MAN-2024"));
    nursery(&tmp).args(["recent", "--clear"]).assert().success();
    nursery(&tmp).arg("recent").assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn search_filters_by_type_and_site() {
    let tmp = config_dir();
    let output = nursery(&tmp)
        .args(["search", "", "--type", "batch", "--site", "south", "--json"])
        .output()
        .unwrap();
    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<_> = results.as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap().to_string()).collect();
    assert_eq!(ids, ["KOW-2023-010", "MAN-2024-171"]);
}

#[test]
fn suggest_groups_by_type() {
    let tmp = config_dir();
    nursery(&tmp)
        .args(["suggest", "mānuka", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("species"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("task"));
}

#[test]
fn unknown_type_is_rejected() {
    let tmp = config_dir();
    nursery(&tmp).args(["search", "x", "--type", "greenhouse"]).assert().failure();
}
