#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn tracker(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("expiry-tracker").expect("expiry-tracker binary");
    cmd.env_remove("EXPIRY_TRACKER_DATA_DIR")
        .env_remove("EXPIRY_TRACKER_STORAGE")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

#[test]
fn html_listing_of_unreadable_store_exits_nonzero() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("local_storage.json"), "not json").unwrap();

    tracker(dir.path())
        .args(["--storage", "fallback", "list", "--html"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("<p>Error loading items.</p>"));
}

#[test]
fn unknown_storage_mode_is_rejected() {
    let dir = tempdir().unwrap();

    tracker(dir.path())
        .args(["--storage", "webdb", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible values: auto, fallback"));
}

#[test]
fn added_item_shows_up_in_listing() {
    let dir = tempdir().unwrap();

    tracker(dir.path())
        .args([
            "add", "--category", "Dairy", "--item", "Milk", "--date", "2024-01-10", "--reminder", "2024-01-08",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved successfully!"));

    tracker(dir.path())
        .args(["list", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<strong>Name:</strong> Milk<br>"));
}

#[test]
fn missing_required_field_fails_without_saving() {
    let dir = tempdir().unwrap();

    tracker(dir.path())
        .args(["add", "--category", "Dairy", "--item", "Milk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill all required fields."));

    tracker(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No items found."));
}
