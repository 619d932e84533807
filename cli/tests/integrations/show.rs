use crate::{write_kb, BLOCKS};
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_show_lists_facts_and_rules() {
    let (_dir, path) = write_kb("blocks.kb", BLOCKS);

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("show").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Facts (8):"))
        .stdout(predicate::str::contains("Rules (6):"))
        .stdout(predicate::str::contains("(needs-crane cube)"))
        .stdout(predicate::str::contains("Justifications"));
}

#[test]
fn test_cli_show_empty_file() {
    let (_dir, path) = write_kb("empty.kb", "# nothing yet\n");

    let mut cmd = Command::cargo_bin("modus").unwrap();
    cmd.arg("show").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Facts (0):"))
        .stdout(predicate::str::contains("Rules (0):"));
}
