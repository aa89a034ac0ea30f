//! Tool settings (tamio.toml)

use crate::domain::DeploymentRole;
use crate::error::{Result, TamioError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "tamio.toml";

/// An MSI package the maintenance page can remove
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub code: String,
}

impl Product {
    pub fn new(name: &str, code: &str) -> Self {
        Product {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub role: DeploymentRole,
    pub xml_dir: PathBuf,
    pub log_dir: PathBuf,
    pub database_dir: PathBuf,
    pub server_check_timeout_secs: u64,
    pub services: Vec<String>,
    pub products: Vec<Product>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            role: DeploymentRole::Server,
            xml_dir: Self::default_pos_dir().join("xml"),
            log_dir: std::env::temp_dir().join("tamio_logs"),
            database_dir: Self::default_pos_dir().join("mysql"),
            server_check_timeout_secs: 3,
            services: vec!["POSDaemonService".to_string(), "MySQL-POS".to_string()],
            products: vec![
                Product::new(
                    "Splashtop Streamer",
                    "{B7C5EA94-B96A-41F5-BE95-25D78B486678}",
                ),
                Product::new("Paymentree", "{7691B95A-0DCC-423E-A583-C2B8AE7DE260}"),
                Product::new(
                    "OpenVPN 2.4.6-I602 (x64)",
                    "{DF3B9B17-6183-47D9-8C7F-DA6C4B9512E9}",
                ),
                Product::new(
                    "TAP-Windows 9.21.2",
                    "{F3C4B17F-3A6F-4E4B-97B2-6DBDDFE6F200}",
                ),
            ],
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TamioError::MissingFile(path.to_path_buf())
            } else {
                TamioError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| TamioError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Locate and load the settings file.
    ///
    /// Order: explicit path, TAMIO_CONFIG, tamio.toml in `cwd`, defaults.
    /// TAMIO_XML_DIR then overrides `xml_dir`.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::load_from(path)?
        } else if let Ok(path) = std::env::var("TAMIO_CONFIG") {
            Self::load_from(Path::new(&path))?
        } else {
            let local = cwd.join(CONFIG_FILE_NAME);
            if local.is_file() {
                Self::load_from(&local)?
            } else {
                Config::default()
            }
        };

        if let Ok(dir) = std::env::var("TAMIO_XML_DIR") {
            if !dir.trim().is_empty() {
                config.xml_dir = PathBuf::from(dir);
            }
        }

        Ok(config)
    }

    /// Find a catalog product by name (case-insensitive) or product code
    pub fn find_product(&self, name_or_code: &str) -> Option<&Product> {
        let needle = name_or_code.trim();
        self.products.iter().find(|p| {
            p.name.eq_ignore_ascii_case(needle)
                || p.code.trim_matches(|c| c == '{' || c == '}').eq_ignore_ascii_case(
                    needle.trim_matches(|c| c == '{' || c == '}'),
                )
        })
    }

    /// Root of the POS installation
    fn default_pos_dir() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\pos")
        } else {
            PathBuf::from("pos")
        }
    }
}
