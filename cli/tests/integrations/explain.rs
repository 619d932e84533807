use crate::{write_kb, BLOCKS};
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_explain_derived_fact() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("explain").arg(&path).arg("(needs-crane cube)");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("fact: (needs-crane cube)\n"))
        .stdout(predicate::str::contains("└─ supported by"))
        .stdout(predicate::str::contains("fact: (isa cube block) [asserted]"))
        .stdout(predicate::str::contains(
            "rule: ((heavy ?x) (movable ?x)) -> (needs-crane ?x) [asserted]",
        ));
}

#[test]
fn test_cli_explain_json() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("explain")
        .arg(&path)
        .arg("fact: (movable cube)")
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["asserted"], false);
    assert_eq!(json["item"]["type"], "fact");
    let support = &json["supported_by"][0];
    assert_eq!(support["fact"]["asserted"], true);
    assert_eq!(support["rule"]["item"]["type"], "rule");
}

#[test]
fn test_cli_explain_unknown_item() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("explain").arg(&path).arg("(movable sphere)");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not in the knowledge base"));
}
