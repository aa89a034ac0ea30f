//! Receipt printer use case

use crate::domain::devices::is_valid_baud;
use crate::domain::validators::validate_ip_address;
use crate::domain::{DeviceSettings, PrinterKind};
use crate::error::{Result, TamioError};
use crate::infrastructure::ConfigRepository;

/// Requested printer changes; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct PrinterUpdate {
    pub kind: Option<PrinterKind>,
    pub ip: Option<String>,
    pub com: Option<String>,
    pub baud: Option<String>,
}

impl PrinterUpdate {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.ip.is_none() && self.com.is_none() && self.baud.is_none()
    }
}

pub struct PrinterService<R: ConfigRepository> {
    repository: R,
}

impl<R: ConfigRepository> PrinterService<R> {
    pub fn new(repository: R) -> Self {
        PrinterService { repository }
    }

    /// Current printer settings; defaults when devices.xml does not exist
    pub fn show(&self) -> Result<DeviceSettings> {
        match self.repository.load_devices() {
            Err(TamioError::MissingFile(_)) => Ok(DeviceSettings::default()),
            other => other,
        }
    }

    /// Merge `update` over the current settings and save
    pub fn set(&self, update: PrinterUpdate) -> Result<DeviceSettings> {
        let mut devices = self.show()?;

        if let Some(kind) = update.kind {
            devices.protocol = kind.protocol().to_string();
        }
        if let Some(ip) = update.ip {
            let ip = ip.trim();
            devices.ip = if ip.is_empty() {
                String::new()
            } else {
                validate_ip_address(ip)?
            };
        }
        if let Some(com) = update.com {
            devices.com = com.trim().to_uppercase();
        }
        if let Some(baud) = update.baud {
            if !is_valid_baud(&baud) {
                return Err(TamioError::Validation(format!(
                    "Invalid baud rate: '{}'",
                    baud
                )));
            }
            devices.baud = baud.trim().to_string();
        }

        self.repository.save_devices(&devices)?;
        Ok(devices)
    }
}
