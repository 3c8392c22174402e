//! End-to-end tests for the nidcard binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn nidcard() -> Command {
    Command::cargo_bin("nidcard").unwrap()
}

#[test]
fn help_lists_subcommands() {
    nidcard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_works() {
    nidcard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nidcard"));
}

#[test]
fn process_missing_file_fails() {
    nidcard()
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_text_dump_emits_success_payload() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("card.txt");
    std::fs::write(&input, "Gender\nMale\nBlood Group\nO-\n").unwrap();

    nidcard()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status":"success""#))
        .stdout(predicate::str::contains(r#"{"Gender":"Male"}"#))
        .stdout(predicate::str::contains(r#"{"Blood Group":"O-"}"#));
}

#[test]
fn colon_strategy_emits_mappings() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("card.txt");
    std::fs::write(&input, "Name: John\n").unwrap();

    nidcard()
        .args(["process", "--strategy", "colon-delimited"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Name":"John""#));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("card.docx");
    std::fs::write(&input, "whatever").unwrap();

    nidcard()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}
