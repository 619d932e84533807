use crate::{write_kb, BLOCKS};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_run_reports_counts_without_queries() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded 8 fact(s) and 6 rule(s)"));
}

#[test]
fn test_cli_run_ask() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run").arg(&path).arg("--ask").arg("(movable ?x)");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("? (movable ?x)"))
        .stdout(predicate::str::contains("{?x: cube}"))
        .stdout(predicate::str::contains("{?x: pyramid}"));
}

#[test]
fn test_cli_run_ask_without_answers_succeeds() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run")
        .arg(&path)
        .arg("--ask")
        .arg("(needs-crane pyramid)");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No matching facts"));
}

#[test]
fn test_cli_run_retract_then_ask() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run")
        .arg(&path)
        .arg("--retract")
        .arg("fact: (isa cube block)")
        .arg("--ask")
        .arg("(heavy ?x)");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Removed"))
        .stdout(predicate::str::contains("fact: (needs-crane cube)"))
        .stdout(predicate::str::contains("No matching facts"));
}

#[test]
fn test_cli_run_retract_unknown_item_is_noop() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run").arg(&path).arg("--retract").arg("(isa sphere block)");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Nothing retracted"));
}

#[test]
fn test_cli_run_json_output() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run")
        .arg(&path)
        .arg("--ask")
        .arg("(heavy ?x)")
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let answers = json["queries"][0]["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["bindings"]["x"]["name"], "cube");
    assert_eq!(json["rule_count"], 6);
}

#[test]
fn test_cli_run_loads_directory_recursively() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("rules");
    fs::create_dir(&nested).unwrap();
    fs::write(temp_dir.path().join("facts.kb"), "fact: (isa cube block)\n").unwrap();
    fs::write(
        nested.join("blocks.kb"),
        "rule: ((isa ?x block)) -> (movable ?x)\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a knowledge base").unwrap();

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run")
        .arg(temp_dir.path())
        .arg("--ask")
        .arg("(movable cube)");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("{}"))
        .stdout(predicate::str::contains("(movable cube)"));
}

#[test]
fn test_cli_run_parse_error() {
    let (_dir, path) = write_kb("broken.kb", "fact: (isa cube block)\nfact: (isa cube\n");

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_cli_run_unbound_consequent_is_rejected() {
    let (_dir, path) = write_kb("bad_rule.kb", "rule: ((isa ?x block)) -> (on ?x ?y)\n");

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Semantic error"))
        .stderr(predicate::str::contains(
            "Every variable in the consequent must appear in an antecedent",
        ));
}

#[test]
fn test_cli_run_missing_path() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("run").arg(temp_dir.path().join("missing.kb"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
