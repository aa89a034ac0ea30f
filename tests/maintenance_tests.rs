//! Integration tests for validation and maintenance commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;

mod common;
use common::Workspace;

#[test]
fn test_validate_normalizes() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["validate", "postal", "h1a2b3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("H1A 2B3\n"));

    ws.cmd()
        .args(["validate", "sector", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::diff("BAR\n"));

    ws.cmd()
        .args(["validate", "product", "7691b95a-0dcc-423e-a583-c2b8ae7de260"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "{7691B95A-0DCC-423E-A583-C2B8AE7DE260}",
        ));
}

#[test]
fn test_validate_rejects() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["validate", "ip", "10.0.0.256"])
        .assert()
        .code(3);

    ws.cmd()
        .args(["validate", "hostname", "caisse-"])
        .assert()
        .code(3);

    ws.cmd()
        .args(["validate", "gst", "12345678"])
        .assert()
        .code(3);
}

#[test]
fn test_products_lists_catalog() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("products")
        .assert()
        .success()
        .stdout(predicate::str::contains("Splashtop Streamer"))
        .stdout(predicate::str::contains(
            "{DF3B9B17-6183-47D9-8C7F-DA6C4B9512E9}",
        ));
}

#[test]
fn test_uninstall_needs_confirmation() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["uninstall", "Paymentree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_uninstall_rejects_unknown_product_before_confirming() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["uninstall", "garbage"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown product"))
        .stderr(predicate::str::contains("--yes").not());
}

#[test]
fn test_uninstall_confirmation_names_catalog_product() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["uninstall", "tap-windows 9.21.2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TAP-Windows 9.21.2 {F3C4B17F-3A6F-4E4B-97B2-6DBDDFE6F200}",
        ));
}

#[test]
fn test_uninstall_unknown_product() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["uninstall", "Minesweeper", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("tamio products"));
}

#[test]
fn test_database_delete() {
    let ws = Workspace::new();
    let db = ws.path().join("mysql");
    fs::create_dir_all(db.join("pos")).unwrap();
    fs::write(db.join("ibdata1"), vec![0u8; 1536]).unwrap();
    fs::write(db.join("pos").join("sales.ibd"), vec![0u8; 512]).unwrap();

    ws.cmd()
        .args(["database", "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert!(db.exists());

    ws.cmd()
        .args(["database", "delete", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 files (2.0 Ko)"));
    assert!(!db.exists());
}

#[test]
fn test_database_delete_missing_folder() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["database", "delete", "--yes", "--path"])
        .arg(ws.path().join("no_such_dir"))
        .assert()
        .code(2);
}

#[test]
fn test_check_server_invalid_address() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["check-server", "not-an-ip"])
        .assert()
        .code(3);
}

#[cfg(not(windows))]
#[test]
fn test_windows_only_commands() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["service", "stop", "MySQL-POS"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only available on Windows"));

    ws.cmd()
        .args(["host", "rename", "CAISSE-01"])
        .assert()
        .code(1);
}
