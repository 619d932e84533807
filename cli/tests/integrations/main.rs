mod explain;
mod run;
mod show;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const BLOCKS: &str = r#"
# Blocks world
fact: (isa cube block)
fact: (isa pyramid block)
fact: (size cube big)
fact: (size pyramid small)

rule: ((isa ?x block)) -> (movable ?x)
rule: ((isa ?x block) (size ?x big)) -> (heavy ?x)
rule: ((heavy ?x) (movable ?x)) -> (needs-crane ?x)
"#;

/// Write `content` to `name` inside a fresh temporary directory
pub fn write_kb(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}
