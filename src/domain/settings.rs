//! POS settings stored as attributes of the `<Config>` element.

use crate::domain::validators::{
    validate_establishment_number, validate_mev_sector, validate_postal_code,
    validate_server_address, validate_tax_number, ValidationError,
};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Root element of `config.xml`.
pub const CONFIG_ELEMENT: &str = "Config";

/// Document written when `config.xml` does not exist yet.
pub const DEFAULT_CONFIG_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Config Database="" Server="" Replication="0" Auto_Logout="0" GUI_Dark_Mode="1"
        Debut_Print="0" Auto_Print="0" Use_Floorplan="1" Use_Retail="1"
        Use_Counter="1" Use_Pickup="1" Use_Delivery="1" GUI_Font_Size="12"
        GUI_List_Height="30" MEV_UserName="" MEV_Gst="" MEV_Qst=""
        MEV_Auth_Code="" MEV_File_Number="" MEV_Address="" MEV_Zip=""
        MEV_Sector="RES" MEV_Commerce_Name="" />
"#;

pub const GENERAL_KEYS: [&str; 14] = [
    "Database",
    "Server",
    "Replication",
    "Auto_Logout",
    "GUI_Dark_Mode",
    "Debut_Print",
    "Auto_Print",
    "Use_Floorplan",
    "Use_Retail",
    "Use_Counter",
    "Use_Pickup",
    "Use_Delivery",
    "GUI_Font_Size",
    "GUI_List_Height",
];

/// Flags stored as `"1"` / `"0"`.
pub const BOOLEAN_KEYS: [&str; 10] = [
    "Replication",
    "Auto_Logout",
    "GUI_Dark_Mode",
    "Debut_Print",
    "Auto_Print",
    "Use_Floorplan",
    "Use_Retail",
    "Use_Counter",
    "Use_Pickup",
    "Use_Delivery",
];

/// Quebec sales-reporting (MEV) merchant fields.
pub const MEV_KEYS: [&str; 9] = [
    "MEV_UserName",
    "MEV_Gst",
    "MEV_Qst",
    "MEV_Auth_Code",
    "MEV_File_Number",
    "MEV_Address",
    "MEV_Zip",
    "MEV_Sector",
    "MEV_Commerce_Name",
];

/// Which set of keys a load covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyGroup {
    #[default]
    General,
    Mev,
    All,
}

impl KeyGroup {
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            KeyGroup::General => GENERAL_KEYS.to_vec(),
            KeyGroup::Mev => MEV_KEYS.to_vec(),
            KeyGroup::All => GENERAL_KEYS.iter().chain(MEV_KEYS.iter()).copied().collect(),
        }
    }
}

impl FromStr for KeyGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(KeyGroup::General),
            "mev" => Ok(KeyGroup::Mev),
            "all" => Ok(KeyGroup::All),
            _ => Err(format!(
                "Invalid key group: '{}'. Valid groups are: general, mev, all",
                s
            )),
        }
    }
}

/// Ordered set of attribute values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsRecord {
    values: BTreeMap<String, String>,
}

impl SettingsRecord {
    pub fn new() -> Self {
        SettingsRecord::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn set_flag(&mut self, key: impl Into<String>, enabled: bool) {
        self.set(key, if enabled { "1" } else { "0" });
    }

    /// Interpret a stored flag; anything other than `"1"` is off.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("1")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub fn is_known_key(key: &str) -> bool {
    GENERAL_KEYS.contains(&key) || MEV_KEYS.contains(&key)
}

/// Parse a boolean given on the command line.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validate `value` for `key` and return the form to store.
pub fn normalize_value(key: &str, value: &str) -> Result<String, ValidationError> {
    if BOOLEAN_KEYS.contains(&key) {
        return parse_flag(value)
            .map(|b| if b { "1" } else { "0" }.to_string())
            .ok_or_else(|| ValidationError::new(key, format!("'{}' is not a boolean", value)));
    }

    match key {
        "Server" | "Database" => validate_server_address(value),
        "GUI_Font_Size" | "GUI_List_Height" => match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n.to_string()),
            _ => Err(ValidationError::new(
                key,
                format!("'{}' is not a positive integer", value),
            )),
        },
        "MEV_Gst" => validate_tax_number(value, "GST number"),
        "MEV_Qst" => validate_tax_number(value, "QST number"),
        "MEV_File_Number" => validate_establishment_number(value),
        "MEV_Zip" => validate_postal_code(value),
        "MEV_Sector" => validate_mev_sector(value),
        "MEV_UserName" | "MEV_Auth_Code" | "MEV_Address" | "MEV_Commerce_Name" => {
            Ok(value.trim().to_string())
        }
        _ => Err(ValidationError::new(
            "config key",
            format!("unknown key '{}'", key),
        )),
    }
}

/// Street address parts as entered by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub number: String,
    pub street: String,
    pub city: String,
}

impl Address {
    pub fn new(number: &str, street: &str, city: &str) -> Self {
        Address {
            number: number.trim().to_string(),
            street: street.trim().to_string(),
            city: city.trim().to_string(),
        }
    }

    /// Stored form of `MEV_Address`: `num, street, city`.
    pub fn compose(&self) -> String {
        format!("{}, {}, {}", self.number, self.street, self.city)
    }

    /// Inverse of [`Address::compose`]. Extra commas stay in the city.
    pub fn split(stored: &str) -> Self {
        let mut parts = stored.splitn(3, ',');
        let number = parts.next().unwrap_or("");
        let street = parts.next().unwrap_or("");
        let city = parts.next().unwrap_or("");
        Address::new(number, street, city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_groups() {
        assert_eq!(KeyGroup::General.keys().len(), 14);
        assert_eq!(KeyGroup::Mev.keys().len(), 9);
        assert_eq!(KeyGroup::All.keys().len(), 23);
        assert_eq!(KeyGroup::from_str("MEV").unwrap(), KeyGroup::Mev);
        assert!(KeyGroup::from_str("printer").is_err());
    }

    #[test]
    fn test_default_config_declares_every_key() {
        for key in KeyGroup::All.keys() {
            assert!(
                crate::domain::attributes::has_attribute(DEFAULT_CONFIG_XML, key),
                "missing {}",
                key
            );
        }
    }

    #[test]
    fn test_record_flags() {
        let mut record = SettingsRecord::new();
        record.set_flag("Use_Retail", true);
        record.set_flag("Auto_Print", false);
        assert!(record.flag("Use_Retail"));
        assert!(!record.flag("Auto_Print"));
        assert!(!record.flag("Use_Pickup"));
        assert_eq!(record.get("Auto_Print"), Some("0"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_normalize_booleans() {
        assert_eq!(normalize_value("Use_Retail", "yes").unwrap(), "1");
        assert_eq!(normalize_value("Use_Retail", "OFF").unwrap(), "0");
        assert_eq!(normalize_value("GUI_Dark_Mode", "1").unwrap(), "1");
        assert!(normalize_value("Use_Retail", "maybe").is_err());
    }

    #[test]
    fn test_normalize_numbers_and_addresses() {
        assert_eq!(normalize_value("GUI_Font_Size", " 14 ").unwrap(), "14");
        assert!(normalize_value("GUI_Font_Size", "0").is_err());
        assert!(normalize_value("GUI_List_Height", "tall").is_err());
        assert_eq!(normalize_value("Server", "192.168.1.2").unwrap(), "192.168.1.2");
        assert!(normalize_value("Database", "192.168.1.999").is_err());
    }

    #[test]
    fn test_normalize_mev_fields() {
        assert_eq!(normalize_value("MEV_Zip", "h2x1y4").unwrap(), "H2X 1Y4");
        assert_eq!(normalize_value("MEV_Sector", "bar").unwrap(), "BAR");
        assert_eq!(normalize_value("MEV_Gst", "123456789").unwrap(), "123456789");
        assert!(normalize_value("MEV_Qst", "12").is_err());
        assert!(normalize_value("MEV_File_Number", "1234567").is_err());
        assert_eq!(
            normalize_value("MEV_Commerce_Name", "  Chez Paul ").unwrap(),
            "Chez Paul"
        );
    }

    #[test]
    fn test_normalize_unknown_key() {
        let err = normalize_value("Printer", "x").unwrap_err();
        assert!(err.reason.contains("unknown key"));
        assert!(!is_known_key("Printer"));
        assert!(is_known_key("MEV_Zip"));
    }

    #[test]
    fn test_address_compose_and_split() {
        let address = Address::new(" 123 ", "Rue Principale", "Montréal");
        assert_eq!(address.compose(), "123, Rue Principale, Montréal");
        assert_eq!(Address::split(&address.compose()), address);
        assert_eq!(Address::split(""), Address::default());
    }
}
