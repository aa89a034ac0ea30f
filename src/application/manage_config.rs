//! Config management use case

use crate::domain::settings::{is_known_key, normalize_value};
use crate::domain::{KeyGroup, SettingsRecord};
use crate::error::{Result, TamioError};
use crate::infrastructure::ConfigRepository;

/// Service for reading and writing single settings in config.xml
pub struct ConfigService<R: ConfigRepository> {
    repository: R,
}

impl<R: ConfigRepository> ConfigService<R> {
    /// Create a new config service
    pub fn new(repository: R) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        Self::check_key(key)?;
        let record = self.repository.load_settings(KeyGroup::All)?;
        Ok(record.get(key).unwrap_or_default().to_string())
    }

    /// Validate and set a config value, returning the stored form
    pub fn set(&self, key: &str, value: &str) -> Result<String> {
        Self::check_key(key)?;
        let normalized = normalize_value(key, value)?;

        let mut record = SettingsRecord::new();
        record.set(key, normalized.clone());
        let outcome = self.repository.save_settings(&record)?;

        if outcome.updated.is_empty() {
            return Err(TamioError::Config(format!(
                "Key '{}' is not present in config.xml",
                key
            )));
        }

        Ok(normalized)
    }

    /// List config values of a group
    pub fn list(&self, group: KeyGroup) -> Result<SettingsRecord> {
        self.repository.load_settings(group)
    }

    fn check_key(key: &str) -> Result<()> {
        if is_known_key(key) {
            Ok(())
        } else {
            Err(TamioError::Config(format!(
                "Unknown config key: '{}'. Use 'tamio config --list --group all' to see valid keys",
                key
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XmlConfigStore;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService<XmlConfigStore>) {
        let temp = TempDir::new().unwrap();
        let store = XmlConfigStore::new(temp.path().to_path_buf());
        store.ensure_paths_exist().unwrap();
        (temp, ConfigService::new(store))
    }

    #[test]
    fn test_get_default_value() {
        let (_temp, service) = service();
        assert_eq!(service.get("GUI_Font_Size").unwrap(), "12");
        assert_eq!(service.get("MEV_Sector").unwrap(), "RES");
    }

    #[test]
    fn test_set_normalizes() {
        let (_temp, service) = service();
        assert_eq!(service.set("Use_Retail", "no").unwrap(), "0");
        assert_eq!(service.get("Use_Retail").unwrap(), "0");
        assert_eq!(service.set("MEV_Zip", "g1r4p5").unwrap(), "G1R 4P5");
    }

    #[test]
    fn test_set_rejects_invalid_value() {
        let (_temp, service) = service();
        assert!(matches!(
            service.set("Server", "not an address"),
            Err(TamioError::Validation(_))
        ));
        assert_eq!(service.get("Server").unwrap(), "");
    }

    #[test]
    fn test_unknown_key() {
        let (_temp, service) = service();
        match service.get("Printer").unwrap_err() {
            TamioError::Config(msg) => assert!(msg.contains("Unknown config key: 'Printer'")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_set_key_absent_from_file() {
        let temp = TempDir::new().unwrap();
        let store = XmlConfigStore::new(temp.path().to_path_buf());
        std::fs::write(store.config_path(), r#"<Config Server="" />"#).unwrap();
        let service = ConfigService::new(store);

        assert!(service.set("Server", "10.0.0.1").is_ok());
        assert!(matches!(
            service.set("Use_Retail", "1"),
            Err(TamioError::Config(_))
        ));
    }

    #[test]
    fn test_list_group() {
        let (_temp, service) = service();
        let mev = service.list(KeyGroup::Mev).unwrap();
        assert_eq!(mev.len(), 9);
        assert_eq!(mev.get("MEV_Sector"), Some("RES"));
    }
}
