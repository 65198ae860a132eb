//! End-to-end tests of the equiptrack binary against a temporary data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn equiptrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("equiptrack").unwrap();
    cmd.env("EQUIPTRACK_DATA_DIR", dir.path())
        .env_remove("EQUIPTRACK_USER")
        .env_remove("EQUIPTRACK_LOG");
    cmd
}

fn add_laptop(
    dir: &TempDir,
    asset_tag: &str,
    serial: &str,
    stock: Option<&str>,
) -> assert_cmd::assert::Assert {
    let mut cmd = equiptrack(dir);
    cmd.args([
        "equipment", "add", "Laptop", "-m", "T14", "-b", "Lenovo", "-c", "Computers", "-a",
        asset_tag, "-s", serial,
    ]);
    if let Some(stock) = stock {
        cmd.args(["--stock", stock]);
    }
    cmd.assert()
}

#[test]
fn stock_move_is_logged_and_recorded() {
    let dir = TempDir::new().unwrap();
    equiptrack(&dir).args(["stock", "add", "Main"]).assert().success();
    equiptrack(&dir).args(["stock", "add", "Annex"]).assert().success();

    add_laptop(&dir, "1001", "SN-1", Some("Main"))
        .success()
        .stdout(predicate::str::contains("Registered equipment: Laptop"))
        .stdout(predicate::str::contains("ID: 1"));

    equiptrack(&dir)
        .args(["equipment", "edit", "1", "--stock", "Annex"])
        .assert()
        .success();

    equiptrack(&dir)
        .args(["history", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATED"))
        .stdout(predicate::str::contains("stock: Stock ID 1 → Annex"));

    equiptrack(&dir)
        .args(["history", "transfers", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved from stock 1 to stock 2"));
}

#[test]
fn duplicate_asset_tag_is_rejected() {
    let dir = TempDir::new().unwrap();
    add_laptop(&dir, "1001", "SN-1", None).success();

    add_laptop(&dir, "1001", "SN-2", None)
        .failure()
        .stderr(predicate::str::contains("asset tag already registered: 1001"));

    equiptrack(&dir)
        .args(["history", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATED").count(1));
}

#[test]
fn reader_cannot_delete() {
    let dir = TempDir::new().unwrap();
    add_laptop(&dir, "1001", "SN-1", None).success();
    equiptrack(&dir)
        .args(["user", "add", "rita", "-e", "rita@example.com", "--role", "reader"])
        .assert()
        .success();

    equiptrack(&dir)
        .args(["--as", "rita", "equipment", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));

    equiptrack(&dir)
        .env("EQUIPTRACK_USER", "rita")
        .args(["equipment", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Laptop"));
}

#[test]
fn promoted_user_can_edit() {
    let dir = TempDir::new().unwrap();
    add_laptop(&dir, "1001", "SN-1", None).success();
    equiptrack(&dir)
        .args(["user", "add", "rita", "-e", "rita@example.com", "--role", "reader"])
        .assert()
        .success();

    equiptrack(&dir)
        .args(["--as", "rita", "equipment", "edit", "1", "--status", "repair"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));

    equiptrack(&dir)
        .args(["user", "edit", "rita", "--role", "standard", "-n", "Rita"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated user: rita (standard"));

    equiptrack(&dir)
        .args(["--as", "rita", "equipment", "edit", "1", "--status", "repair"])
        .assert()
        .success();

    equiptrack(&dir)
        .args(["user", "edit", "rita", "--role", "owner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid role: 'owner'"));
}

#[test]
fn unknown_acting_user_fails() {
    let dir = TempDir::new().unwrap();

    equiptrack(&dir)
        .args(["--as", "ghost", "equipment", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: ghost"));
}

#[test]
fn deleted_equipment_keeps_history() {
    let dir = TempDir::new().unwrap();
    add_laptop(&dir, "1001", "SN-1", None).success();

    equiptrack(&dir)
        .args(["equipment", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted equipment: Laptop"));

    equiptrack(&dir)
        .args(["history", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETED"))
        .stdout(predicate::str::contains("deleted equipment"))
        .stdout(predicate::str::contains("Serial: SN-1"));
}

#[test]
fn export_audit_csv() {
    let dir = TempDir::new().unwrap();
    add_laptop(&dir, "1001", "SN-1", None).success();
    let output = dir.path().join("audit.csv");

    equiptrack(&dir)
        .args(["export", "audit"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 audit entries"));

    let contents = std::fs::read_to_string(output).unwrap();
    assert!(contents.starts_with("ID,Timestamp,Action,Equipment ID,Equipment,Actor,Detail"));
    assert!(contents.contains(",CREATED,1,Laptop,unknown,"));
}
