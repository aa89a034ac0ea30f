//! File system store for the POS xml directory

use crate::domain::attributes::{has_attribute, read_attribute, replace_attribute};
use crate::domain::devices::DEFAULT_DEVICES_XML;
use crate::domain::layout::patch_header;
use crate::domain::menu::{ensure_receipt_printer, MenuPatch};
use crate::domain::settings::DEFAULT_CONFIG_XML;
use crate::domain::{DeviceSettings, HeaderLines, KeyGroup, SettingsRecord};
use crate::error::{Result, TamioError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CONFIG_FILE: &str = "config.xml";
pub const DEVICES_FILE: &str = "devices.xml";
pub const MENU_FILE: &str = "menu.xml";
pub const LAYOUT_FILE: &str = "layout.xml";

/// Keys written and keys skipped by a settings save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub updated: Vec<String>,
    pub missing: Vec<String>,
}

/// Abstract access to the POS configuration documents
pub trait ConfigRepository {
    /// Whether config.xml carries the attribute `key`
    fn has_setting(&self, key: &str) -> Result<bool>;

    /// Load the values of a key group from config.xml
    fn load_settings(&self, group: KeyGroup) -> Result<SettingsRecord>;

    /// Write values into config.xml; unknown attributes are skipped
    fn save_settings(&self, record: &SettingsRecord) -> Result<SaveOutcome>;

    /// Load printer settings from devices.xml
    fn load_devices(&self) -> Result<DeviceSettings>;

    /// Write printer settings into devices.xml
    fn save_devices(&self, devices: &DeviceSettings) -> Result<()>;
}

/// File system implementation of ConfigRepository
#[derive(Debug, Clone)]
pub struct XmlConfigStore {
    pub xml_dir: PathBuf,
}

impl XmlConfigStore {
    pub fn new(xml_dir: PathBuf) -> Self {
        XmlConfigStore { xml_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.xml_dir.join(CONFIG_FILE)
    }

    pub fn devices_path(&self) -> PathBuf {
        self.xml_dir.join(DEVICES_FILE)
    }

    pub fn menu_path(&self) -> PathBuf {
        self.xml_dir.join(MENU_FILE)
    }

    pub fn layout_path(&self) -> PathBuf {
        self.xml_dir.join(LAYOUT_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.config_path().is_file()
    }

    /// Create the xml directory and a default config.xml when missing.
    pub fn ensure_paths_exist(&self) -> Result<()> {
        if !self.xml_dir.exists() {
            fs::create_dir_all(&self.xml_dir)?;
            info!(dir = %self.xml_dir.display(), "Created xml directory");
        }

        if !self.config_path().exists() {
            self.write_file(&self.config_path(), DEFAULT_CONFIG_XML)?;
            info!(path = %self.config_path().display(), "Created default config.xml");
        }

        Ok(())
    }

    /// Write default config.xml and devices.xml, returning the files written.
    pub fn initialize(&self, force: bool) -> Result<Vec<PathBuf>> {
        if !self.xml_dir.exists() {
            fs::create_dir_all(&self.xml_dir)?;
        }

        if !force && self.is_initialized() {
            return Err(TamioError::Config(format!(
                "Directory already initialized: {}",
                self.xml_dir.display()
            )));
        }

        let mut written = Vec::new();
        for (path, default) in [
            (self.config_path(), DEFAULT_CONFIG_XML),
            (self.devices_path(), DEFAULT_DEVICES_XML),
        ] {
            if path.exists() && !force {
                debug!(path = %path.display(), "Keeping existing file");
                continue;
            }
            self.write_file(&path, default)?;
            written.push(path);
        }

        Ok(written)
    }

    /// Rewrite the three receipt header lines of layout.xml.
    pub fn update_layout_header(&self, lines: &HeaderLines) -> Result<()> {
        let path = self.layout_path();
        let content = self.read_file(&path)?;
        let patched = patch_header(&content, lines)?;
        self.write_file(&path, &patched)?;

        info!(
            name = %lines.name,
            street = %lines.street,
            city = %lines.city,
            "Updated layout header"
        );
        Ok(())
    }

    /// Make sure menu.xml declares the Receipt printer.
    /// Returns `true` when the line had to be added.
    pub fn ensure_receipt_printer(&self) -> Result<bool> {
        let path = self.menu_path();
        let content = self.read_file(&path)?;

        match ensure_receipt_printer(&content) {
            MenuPatch::AlreadyPresent => {
                debug!("Receipt printer already present in menu.xml");
                Ok(false)
            }
            MenuPatch::Inserted(updated) => {
                self.write_file(&path, &updated)?;
                info!("Added Receipt printer to menu.xml");
                Ok(true)
            }
            MenuPatch::MissingPrintersSection => Err(TamioError::Config(
                "No <PRINTERS Text=\"PRINTERS\"> section in menu.xml".to_string(),
            )),
        }
    }

    /// Read a file as UTF-8, mapping a missing file to `MissingFile`.
    pub fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TamioError::MissingFile(path.to_path_buf())
            } else {
                TamioError::Io(e)
            }
        })
    }

    /// Best-effort atomic replace: write a sibling temp file, then rename.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    pub fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.tamio-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("config.xml"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

impl ConfigRepository for XmlConfigStore {
    fn has_setting(&self, key: &str) -> Result<bool> {
        let content = self.read_file(&self.config_path())?;
        Ok(has_attribute(&content, key))
    }

    fn load_settings(&self, group: KeyGroup) -> Result<SettingsRecord> {
        let content = self.read_file(&self.config_path())?;

        let mut record = SettingsRecord::new();
        for key in group.keys() {
            record.set(key, read_attribute(&content, key).unwrap_or_default());
        }

        debug!(keys = record.len(), "Loaded configuration");
        Ok(record)
    }

    fn save_settings(&self, record: &SettingsRecord) -> Result<SaveOutcome> {
        if !self.config_path().exists() {
            warn!("config.xml not found, creating a default one");
            self.ensure_paths_exist()?;
        }

        let mut content = self.read_file(&self.config_path())?;
        let mut outcome = SaveOutcome::default();

        for (key, value) in record.iter() {
            match replace_attribute(&content, key, value) {
                Some(updated) => {
                    content = updated;
                    outcome.updated.push(key.to_string());
                }
                None => {
                    warn!(key, "Key not found in config.xml, skipping");
                    outcome.missing.push(key.to_string());
                }
            }
        }

        self.write_file(&self.config_path(), &content)?;
        info!(
            updated = outcome.updated.len(),
            missing = outcome.missing.len(),
            "Saved config.xml"
        );
        Ok(outcome)
    }

    fn load_devices(&self) -> Result<DeviceSettings> {
        let content = self.read_file(&self.devices_path())?;
        let devices = DeviceSettings::from_content(&content);
        debug!(?devices, "Loaded devices.xml");
        Ok(devices)
    }

    fn save_devices(&self, devices: &DeviceSettings) -> Result<()> {
        let path = self.devices_path();
        if !path.exists() {
            warn!("devices.xml not found, creating a default one");
            self.write_file(&path, DEFAULT_DEVICES_XML)?;
        }

        let content = self.read_file(&path)?;
        let updated = devices.apply_to(&content).ok_or_else(|| {
            TamioError::Config(format!("No <Devices> element in {}", path.display()))
        })?;

        self.write_file(&path, &updated)?;
        info!(
            ip = %devices.ip,
            com = %devices.com,
            baud = %devices.baud,
            protocol = %devices.protocol,
            "Saved devices.xml"
        );
        Ok(())
    }
}
