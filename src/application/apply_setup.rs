//! Apply a server setup file.
//!
//! Collects every answer of the server configuration (general settings,
//! order modes, MEV merchant fields, receipt printer), validates all of it,
//! then writes config.xml, devices.xml, the layout header and the menu
//! receipt printer in one pass.

use crate::domain::devices::is_valid_baud;
use crate::domain::settings::normalize_value;
use crate::domain::validators::validate_ip_address;
use crate::domain::{
    Address, DeviceSettings, HeaderLines, KeyGroup, PrinterKind, SettingsRecord,
};
use crate::error::{Result, TamioError};
use crate::infrastructure::store::{CONFIG_FILE, DEVICES_FILE, LAYOUT_FILE, MENU_FILE};
use crate::infrastructure::{ConfigRepository, XmlConfigStore};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSetup {
    pub general: GeneralSection,
    pub features: FeatureSection,
    pub mev: Option<MevSection>,
    pub printer: Option<PrinterSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralSection {
    pub server: Option<String>,
    pub database: Option<String>,
    pub font_size: Option<u32>,
    pub list_height: Option<u32>,
}

/// Feature flags; unset flags keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureSection {
    pub replication: Option<bool>,
    pub auto_logout: Option<bool>,
    pub dark_mode: Option<bool>,
    pub debut_print: Option<bool>,
    pub auto_print: Option<bool>,
    pub floorplan: Option<bool>,
    pub retail: Option<bool>,
    pub counter: Option<bool>,
    pub pickup: Option<bool>,
    pub delivery: Option<bool>,
}

impl FeatureSection {
    fn flags(&self) -> [(&'static str, Option<bool>); 10] {
        [
            ("Replication", self.replication),
            ("Auto_Logout", self.auto_logout),
            ("GUI_Dark_Mode", self.dark_mode),
            ("Debut_Print", self.debut_print),
            ("Auto_Print", self.auto_print),
            ("Use_Floorplan", self.floorplan),
            ("Use_Retail", self.retail),
            ("Use_Counter", self.counter),
            ("Use_Pickup", self.pickup),
            ("Use_Delivery", self.delivery),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MevSection {
    pub commerce_name: String,
    pub username: String,
    pub auth_code: String,
    pub gst: String,
    pub qst: String,
    pub file_number: String,
    pub sector: String,
    pub address_number: String,
    pub address_street: String,
    pub address_city: String,
    pub postal_code: String,
}

impl MevSection {
    fn has_address(&self) -> bool {
        [&self.address_number, &self.address_street, &self.address_city]
            .iter()
            .any(|part| !part.trim().is_empty())
    }

    /// Stored address with each non-blank part replaced by the answer.
    fn merged_address(&self, current_mev: &SettingsRecord) -> Address {
        let stored = Address::split(current_mev.get("MEV_Address").unwrap_or_default());
        let pick = |answer: &str, stored: String| {
            if answer.trim().is_empty() {
                stored
            } else {
                answer.trim().to_string()
            }
        };
        Address {
            number: pick(&self.address_number, stored.number),
            street: pick(&self.address_street, stored.street),
            city: pick(&self.address_city, stored.city),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrinterSection {
    pub kind: PrinterKind,
    pub ip: String,
    pub com: String,
    pub baud: Option<String>,
}

impl ServerSetup {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TamioError::MissingFile(path.to_path_buf())
            } else {
                TamioError::Io(e)
            }
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validate every answer and build the config.xml record.
    ///
    /// `current_mev` holds the stored MEV values; address parts left blank
    /// are taken from it when composing `MEV_Address`.
    pub fn to_record(&self, current_mev: &SettingsRecord) -> Result<SettingsRecord> {
        let mut record = SettingsRecord::new();

        let general = [
            ("Server", self.general.server.clone()),
            ("Database", self.general.database.clone()),
            ("GUI_Font_Size", self.general.font_size.map(|n| n.to_string())),
            ("GUI_List_Height", self.general.list_height.map(|n| n.to_string())),
        ];
        for (key, value) in general {
            if let Some(value) = value {
                record.set(key, normalize_value(key, &value)?);
            }
        }

        for (key, value) in self.features.flags() {
            if let Some(enabled) = value {
                record.set_flag(key, enabled);
            }
        }

        if let Some(mev) = &self.mev {
            let fields = [
                ("MEV_Commerce_Name", mev.commerce_name.as_str()),
                ("MEV_UserName", mev.username.as_str()),
                ("MEV_Auth_Code", mev.auth_code.as_str()),
                ("MEV_Gst", mev.gst.as_str()),
                ("MEV_Qst", mev.qst.as_str()),
                ("MEV_File_Number", mev.file_number.as_str()),
                ("MEV_Sector", mev.sector.as_str()),
                ("MEV_Zip", mev.postal_code.as_str()),
            ];
            // Blank answers keep the current value
            for (key, value) in fields {
                if !value.trim().is_empty() {
                    record.set(key, normalize_value(key, value)?);
                }
            }
            if mev.has_address() {
                record.set("MEV_Address", mev.merged_address(current_mev).compose());
            }
        }

        Ok(record)
    }

    /// Receipt header from the answers, falling back to the stored values.
    pub fn header_lines(
        &self,
        record: &SettingsRecord,
        current_mev: &SettingsRecord,
    ) -> Option<HeaderLines> {
        let mev = self.mev.as_ref()?;
        let value = |key: &str| {
            record
                .get(key)
                .or_else(|| current_mev.get(key))
                .unwrap_or_default()
                .to_string()
        };
        let address = mev.merged_address(current_mev);

        Some(HeaderLines::new(
            &value("MEV_Commerce_Name"),
            &address.number,
            &address.street,
            &address.city,
            &value("MEV_Zip"),
        ))
    }

    /// Printer settings to write, merged over the current ones.
    pub fn to_devices(&self, current: DeviceSettings) -> Result<Option<DeviceSettings>> {
        let Some(printer) = &self.printer else {
            return Ok(None);
        };

        let ip = printer.ip.trim();
        if printer.kind == PrinterKind::Network && !ip.is_empty() {
            validate_ip_address(ip)?;
        }

        let baud = match &printer.baud {
            Some(baud) if !is_valid_baud(baud) => {
                return Err(TamioError::Validation(format!(
                    "Invalid baud rate: '{}'",
                    baud
                )));
            }
            Some(baud) => baud.trim().to_string(),
            None => current.baud,
        };

        Ok(Some(DeviceSettings {
            ip: ip.to_string(),
            com: printer.com.trim().to_string(),
            baud,
            protocol: printer.kind.protocol().to_string(),
        }))
    }
}

/// Files written and files left untouched by a setup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    pub saved: Vec<String>,
    pub not_updated: Vec<(String, String)>,
    pub missing_keys: Vec<String>,
}

impl SetupReport {
    pub fn is_complete(&self) -> bool {
        self.not_updated.is_empty() && self.missing_keys.is_empty()
    }

    fn skipped(&mut self, file: &str, err: &TamioError) {
        warn!(file, error = %err, "File not updated");
        self.not_updated.push((file.to_string(), err.to_string()));
    }
}

/// Validate `setup`, then write every file it touches.
///
/// Nothing is written when validation fails. config.xml is required;
/// the other files are reported in `not_updated` when they cannot be changed.
pub fn apply_setup(store: &XmlConfigStore, setup: &ServerSetup) -> Result<SetupReport> {
    let current_mev = match store.load_settings(KeyGroup::Mev) {
        Err(TamioError::MissingFile(_)) => SettingsRecord::new(),
        other => other?,
    };
    let record = setup.to_record(&current_mev)?;
    let current_devices = match store.load_devices() {
        Err(TamioError::MissingFile(_)) => DeviceSettings::default(),
        other => other?,
    };
    let devices = setup.to_devices(current_devices)?;

    let mut report = SetupReport::default();

    let outcome = store.save_settings(&record)?;
    report.saved.push(CONFIG_FILE.to_string());
    report.missing_keys = outcome.missing;

    if let Some(devices) = devices {
        match store.save_devices(&devices) {
            Ok(()) => report.saved.push(DEVICES_FILE.to_string()),
            Err(e) => report.skipped(DEVICES_FILE, &e),
        }
    }

    if let Some(lines) = setup.header_lines(&record, &current_mev) {
        match store.update_layout_header(&lines) {
            Ok(()) => report.saved.push(LAYOUT_FILE.to_string()),
            Err(e) => report.skipped(LAYOUT_FILE, &e),
        }
    }

    match store.ensure_receipt_printer() {
        Ok(_) => report.saved.push(MENU_FILE.to_string()),
        Err(e) => report.skipped(MENU_FILE, &e),
    }

    info!(
        saved = report.saved.len(),
        not_updated = report.not_updated.len(),
        "Setup applied"
    );
    Ok(report)
}
