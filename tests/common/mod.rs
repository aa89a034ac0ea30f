#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn tamio_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tamio").unwrap();
    cmd.env_remove("TAMIO_CONFIG");
    cmd.env_remove("TAMIO_XML_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Temp directory holding a tamio.toml that points every path inside it
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let settings = format!(
            "xml_dir = '{}'\nlog_dir = '{}'\ndatabase_dir = '{}'\n",
            temp.path().join("xml").display(),
            temp.path().join("logs").display(),
            temp.path().join("mysql").display(),
        );
        fs::write(temp.path().join("tamio.toml"), settings).unwrap();
        Workspace { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn xml(&self, file: &str) -> PathBuf {
        self.temp.path().join("xml").join(file)
    }

    pub fn read_xml(&self, file: &str) -> String {
        fs::read_to_string(self.xml(file)).unwrap()
    }

    /// tamio running in the workspace directory
    pub fn cmd(&self) -> Command {
        let mut cmd = tamio_cmd();
        cmd.current_dir(self.temp.path());
        cmd
    }

    pub fn init(&self) {
        self.cmd().arg("init").assert().success();
    }
}
