//! Integration tests for maintenance repairs

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

mod common;
use common::{bulletin_in, init_with_secrets, ADMIN_SECRET, EDITOR_SECRET};

const LEGACY_DATA: &str = r#"[
  {
    "id": "legacy-1",
    "category": "regular-activities",
    "content": "Bowls club, Thursdays",
    "submittedAt": "2025-11-02T10:00:00Z",
    "month": "2025-12",
    "disposition": "published"
  },
  {
    "id": "fresh-1",
    "category": "local-services",
    "content": "Mobile library",
    "submittedAt": "2025-11-03T10:00:00Z",
    "month": "2025-12"
  },
  {
    "id": "fresh-2",
    "category": "events",
    "content": "Carol singing",
    "submittedAt": "2025-11-04T10:00:00Z",
    "month": "2025-12"
  }
]"#;

fn seed(dir: &Path) {
    init_with_secrets(dir);
    fs::write(dir.join(".bulletin/data/submissions.json"), LEGACY_DATA).unwrap();
}

fn stored(dir: &Path) -> String {
    fs::read_to_string(dir.join(".bulletin/data/submissions.json")).unwrap()
}

#[test]
fn test_legacy_published_counts_for_its_month() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["stats", "--month", "2025-12"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Regular Activities\s+1\n").unwrap())
        .stdout(predicate::str::is_match(r"Total\s+3\n").unwrap());
}

#[test]
fn test_repair_requires_admin() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["repair", "retarget-published", "--yes"])
        .assert()
        .code(5);
}

#[test]
fn test_retarget_published_dry_run_then_apply() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());
    let before = stored(temp.path());

    bulletin_in(temp.path(), ADMIN_SECRET)
        .args(["repair", "retarget-published", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("retarget-published: 1 change(s)"))
        .stdout(predicate::str::contains(
            "legacy-1: disposition published -> 2025-12",
        ))
        .stdout(predicate::str::contains("Dry run"));
    assert_eq!(stored(temp.path()), before);

    bulletin_in(temp.path(), ADMIN_SECRET)
        .args(["repair", "retarget-published"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to run without --yes"));
    assert_eq!(stored(temp.path()), before);

    bulletin_in(temp.path(), ADMIN_SECRET)
        .args(["repair", "retarget-published", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 change(s)"));

    let after = stored(temp.path());
    assert!(!after.contains("\"published\""));
    assert!(after.contains("\"disposition\": \"2025-12\""));
    assert!(temp.path().join(".bulletin/data/backups").is_dir());

    bulletin_in(temp.path(), ADMIN_SECRET)
        .args(["repair", "retarget-published", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to change"));
}

#[test]
fn test_move_month_by_kind() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    bulletin_in(temp.path(), ADMIN_SECRET)
        .args([
            "repair",
            "move-month",
            "--from",
            "2025-12",
            "--to",
            "2026-01",
            "--kind",
            "routine",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("fresh-1: month 2025-12 -> 2026-01"))
        .stdout(predicate::str::contains("legacy-1").not())
        .stdout(predicate::str::contains("fresh-2").not());

    bulletin_in(temp.path(), EDITOR_SECRET)
        .args(["list", "--month", "2026-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fresh-1"))
        .stdout(predicate::str::contains("fresh-2").not());
}

#[test]
fn test_move_month_rejects_bad_kind() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    bulletin_in(temp.path(), ADMIN_SECRET)
        .args([
            "repair",
            "move-month",
            "--from",
            "2025-12",
            "--to",
            "2026-01",
            "--kind",
            "weekly",
        ])
        .assert()
        .code(4);
}
