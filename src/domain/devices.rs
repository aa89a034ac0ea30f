//! Receipt printer connection stored in `devices.xml`.

use crate::domain::attributes::{read_attribute, set_attribute};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEVICES_ELEMENT: &str = "Devices";

pub const DEFAULT_DEVICES_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Devices ip="" com="" baud="9600" protocol="Web Network Printer" />
"#;

pub const DEFAULT_BAUD: &str = "9600";

pub const BAUD_RATES: [u32; 8] = [1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

/// How the receipt printer is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrinterKind {
    /// Ethernet printer addressed by IP
    #[default]
    Network,
    /// Serial printer on a COM port
    Serial,
}

impl PrinterKind {
    /// Value of the `protocol` attribute for this kind.
    pub fn protocol(&self) -> &'static str {
        match self {
            PrinterKind::Network => "Web Network Printer",
            PrinterKind::Serial => "Web",
        }
    }

    pub fn from_protocol(protocol: &str) -> Self {
        if protocol == PrinterKind::Serial.protocol() {
            PrinterKind::Serial
        } else {
            PrinterKind::Network
        }
    }
}

impl FromStr for PrinterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "network" | "ip" => Ok(PrinterKind::Network),
            "serial" | "com" => Ok(PrinterKind::Serial),
            _ => Err(format!(
                "Invalid printer kind: '{}'. Valid kinds are: network, serial",
                s
            )),
        }
    }
}

impl fmt::Display for PrinterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrinterKind::Network => write!(f, "network"),
            PrinterKind::Serial => write!(f, "serial"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    pub ip: String,
    pub com: String,
    pub baud: String,
    pub protocol: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        DeviceSettings {
            ip: String::new(),
            com: String::new(),
            baud: DEFAULT_BAUD.to_string(),
            protocol: PrinterKind::Network.protocol().to_string(),
        }
    }
}

impl DeviceSettings {
    /// Read settings from a `devices.xml` body, defaulting absent attributes.
    pub fn from_content(content: &str) -> Self {
        let defaults = DeviceSettings::default();
        DeviceSettings {
            ip: read_attribute(content, "ip").unwrap_or(defaults.ip),
            com: read_attribute(content, "com").unwrap_or(defaults.com),
            baud: read_attribute(content, "baud").unwrap_or(defaults.baud),
            protocol: read_attribute(content, "protocol").unwrap_or(defaults.protocol),
        }
    }

    pub fn kind(&self) -> PrinterKind {
        PrinterKind::from_protocol(&self.protocol)
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("ip", self.ip.as_str()),
            ("com", self.com.as_str()),
            ("baud", self.baud.as_str()),
            ("protocol", self.protocol.as_str()),
        ]
    }

    /// Write every field into `content`, inserting absent attributes on
    /// `<Devices`. Returns `None` when the document has no such element.
    pub fn apply_to(&self, content: &str) -> Option<String> {
        let mut updated = content.to_string();
        for (key, value) in self.fields() {
            updated = set_attribute(&updated, DEVICES_ELEMENT, key, value)?;
        }
        Some(updated)
    }
}

pub fn is_valid_baud(baud: &str) -> bool {
    baud.trim()
        .parse::<u32>()
        .map(|b| BAUD_RATES.contains(&b))
        .unwrap_or(false)
}
