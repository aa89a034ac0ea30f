//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;

mod common;
use common::{tamio_cmd, Workspace};

#[test]
fn test_init_creates_xml_files() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("for a server (central configuration"));

    assert!(ws.xml("config.xml").exists());
    assert!(ws.xml("devices.xml").exists());

    let content = ws.read_xml("config.xml");
    assert!(content.contains(r#"GUI_Font_Size="12""#));
    assert!(content.contains(r#"MEV_Sector="RES""#));
}

#[test]
fn test_init_already_initialized_fails() {
    let ws = Workspace::new();
    ws.init();

    ws.cmd()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));

    ws.cmd().arg("init").arg("--force").assert().success();
}

#[test]
fn test_init_with_xml_dir_flag() {
    let ws = Workspace::new();
    let other = ws.path().join("elsewhere");

    ws.cmd()
        .arg("--xml-dir")
        .arg(&other)
        .arg("init")
        .assert()
        .success();

    assert!(other.join("config.xml").exists());
    assert!(!ws.xml("config.xml").exists());
}

#[test]
fn test_xml_dir_from_environment() {
    let ws = Workspace::new();
    let other = ws.path().join("from_env");

    ws.cmd()
        .env("TAMIO_XML_DIR", &other)
        .arg("init")
        .assert()
        .success();

    assert!(other.join("config.xml").exists());
}

#[test]
fn test_explicit_settings_file() {
    let ws = Workspace::new();
    let settings = ws.path().join("custom.toml");
    fs::write(
        &settings,
        format!(
            "xml_dir = '{}'\nlog_dir = '{}'\n",
            ws.path().join("custom_xml").display(),
            ws.path().join("logs").display()
        ),
    )
    .unwrap();

    tamio_cmd()
        .arg("--config")
        .arg(&settings)
        .arg("init")
        .assert()
        .success();

    assert!(ws.path().join("custom_xml").join("config.xml").exists());
}

#[test]
fn test_missing_settings_file() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("--config")
        .arg(ws.path().join("nope.toml"))
        .arg("products")
        .assert()
        .code(2);
}

#[test]
fn test_writes_daily_log_file() {
    let ws = Workspace::new();
    ws.init();

    let logs: Vec<_> = fs::read_dir(ws.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("tamio_fs_"));
    assert!(logs[0].ends_with(".log"));
}

#[test]
fn test_config_get_default() {
    let ws = Workspace::new();
    ws.init();

    ws.cmd()
        .arg("config")
        .arg("GUI_List_Height")
        .assert()
        .success()
        .stdout(predicate::str::contains("30"));
}

#[test]
fn test_config_set_normalizes() {
    let ws = Workspace::new();
    ws.init();

    ws.cmd()
        .arg("config")
        .arg("MEV_Zip")
        .arg("h2x1y4")
        .assert()
        .success()
        .stdout(predicate::str::contains("Set MEV_Zip = H2X 1Y4"));

    assert!(ws.read_xml("config.xml").contains(r#"MEV_Zip="H2X 1Y4""#));
}

#[test]
fn test_config_set_invalid_value() {
    let ws = Workspace::new();
    ws.init();

    ws.cmd()
        .arg("config")
        .arg("MEV_Gst")
        .arg("12345")
        .assert()
        .code(3);
}

#[test]
fn test_config_unknown_key() {
    let ws = Workspace::new();
    ws.init();

    ws.cmd()
        .arg("config")
        .arg("Printer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_list_groups() {
    let ws = Workspace::new();
    ws.init();

    ws.cmd()
        .arg("config")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Use_Retail"))
        .stdout(predicate::str::contains("MEV_Sector").not());

    ws.cmd()
        .arg("config")
        .arg("--list")
        .arg("--group")
        .arg("mev")
        .assert()
        .success()
        .stdout(predicate::str::contains("MEV_Sector"))
        .stdout(predicate::str::contains("Use_Retail").not());

    ws.cmd()
        .arg("config")
        .arg("--list")
        .arg("--group")
        .arg("everything")
        .assert()
        .failure();
}

#[test]
fn test_config_without_init() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("config")
        .arg("Server")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tamio init"));
}
