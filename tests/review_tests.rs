//! Integration tests for submitting and reviewing

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{
    bulletin_cmd, bulletin_in, init_with_secrets, submit, ADMIN_SECRET, EDITOR_SECRET,
    SUBMIT_SECRET,
};

#[test]
fn test_submit_requires_configured_secret() {
    let temp = TempDir::new().unwrap();
    bulletin_cmd().arg("init").arg(temp.path()).assert().success();

    bulletin_in(temp.path(), "anything")
        .args(["submit", "events", "Quiz night"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("bulletin config secrets.submit"));
}

#[test]
fn test_submit_rejects_missing_or_wrong_secret() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());

    bulletin_cmd()
        .current_dir(temp.path())
        .args(["submit", "events", "Quiz night"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("BULLETIN_SECRET"));

    bulletin_in(temp.path(), "guess")
        .args(["submit", "events", "Quiz night"])
        .assert()
        .code(5);

    assert!(!temp.path().join(".bulletin/data/submissions.json").exists());
}

#[test]
fn test_submitter_secret_cannot_review() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());

    bulletin_in(temp.path(), SUBMIT_SECRET)
        .arg("list")
        .assert()
        .code(5);

    // The admin secret opens editor operations
    bulletin_in(temp.path(), ADMIN_SECRET)
        .arg("list")
        .assert()
        .success();
}

#[test]
fn test_secret_flag_overrides_environment() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());

    bulletin_in(temp.path(), "wrong")
        .args(["--secret", EDITOR_SECRET, "backlog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions found"));
}

#[test]
fn test_submit_validates_input() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());

    bulletin_in(temp.path(), SUBMIT_SECRET)
        .args(["submit", "gossip", "text"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Valid categories"));

    bulletin_in(temp.path(), SUBMIT_SECRET)
        .args(["submit", "events", "   "])
        .assert()
        .code(4);
}

#[test]
fn test_submit_then_list_current_month() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());

    let id = submit(temp.path(), "Lost and Found", "Grey cat, answers to Moss", Some("Ann"));

    bulletin_in(temp.path(), EDITOR_SECRET)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("lost-and-found"))
        .stdout(predicate::str::contains("unreviewed"))
        .stdout(predicate::str::contains("Grey cat, answers to Moss (Ann)"));

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["list", "--category", "events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions found"));

    let stored = fs::read_to_string(temp.path().join(".bulletin/data/submissions.json")).unwrap();
    assert!(stored.contains("\"publishedName\": \"Ann\""));
    assert!(stored.contains("\"submittedAt\""));
    assert!(!stored.contains("\"disposition\""));
}

#[test]
fn test_set_disposition_moves_between_views() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());
    let id = submit(temp.path(), "classifieds", "Bike for sale", Some("Jo"));

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["set", &id, "backlog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now backlog"));

    bulletin_in(temp.path(), EDITOR_SECRET)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()).not());

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["backlog", "-c", "classifieds"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()));

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["set", &id, "2031-04"])
        .assert()
        .success();

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["stats", "--month", "2031-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("April 2031 issue"))
        .stdout(predicate::str::is_match(r"Classifieds\s+1\n").unwrap())
        .stdout(predicate::str::is_match(r"Events\s+0\n").unwrap())
        .stdout(predicate::str::is_match(r"Total\s+1\n").unwrap());

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["contributors", "-m", "2031-04"])
        .assert()
        .success()
        .stdout("Jo\n");
}

#[test]
fn test_set_rejects_bad_targets() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());
    let id = submit(temp.path(), "events", "Fete", None);

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["set", &id, "published"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("legacy"));

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["set", &id, "2026-13"])
        .assert()
        .code(4);
}

#[test]
fn test_set_unknown_id_leaves_store_untouched() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());
    submit(temp.path(), "events", "Fete", None);

    let path = temp.path().join(".bulletin/data/submissions.json");
    let before = fs::read(&path).unwrap();

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["set", "no-such-id", "backlog"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no-such-id"));

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_malformed_store_is_surfaced() {
    let temp = TempDir::new().unwrap();
    init_with_secrets(temp.path());
    fs::write(
        temp.path().join(".bulletin/data/submissions.json"),
        "{\"not\": \"a list\"}",
    )
    .unwrap();

    bulletin_in(temp.path(), EDITOR_SECRET)
        .arg("list")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("submissions.json"));
}
