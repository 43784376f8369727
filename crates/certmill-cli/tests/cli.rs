//! End-to-end tests for the certmill binary.
//!
//! These never assume `openssl` or `keytool` are installed; the full
//! generation path is covered by the preflight property instead: with an
//! empty PATH the run must fail before anything is written.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_documented_flags() {
    Command::cargo_bin("certmill")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ip-address"))
        .stdout(predicate::str::contains("--hostname"))
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--out-dir"));
}

#[test]
fn short_help_works_too() {
    Command::cargo_bin("certmill")
        .unwrap()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("--hostname"));
}

#[test]
fn unknown_flags_exit_with_code_one() {
    Command::cargo_bin("certmill")
        .unwrap()
        .arg("--bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn missing_toolchain_fails_before_writing_anything() {
    let out = tempfile::tempdir().unwrap();

    Command::cargo_bin("certmill")
        .unwrap()
        .arg("--yes")
        .arg("--out-dir")
        .arg(out.path())
        .env("PATH", "")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("openssl"));

    let written = std::fs::read_dir(out.path()).unwrap().count();
    assert_eq!(written, 0, "preflight failure must not leave artifacts");
}
