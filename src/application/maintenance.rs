//! Maintenance use cases: host rename, services, uninstall, database removal

use crate::domain::validators::{validate_hostname, validate_product_code};
use crate::error::{Result, TamioError};
use crate::infrastructure::system::{current_hostname, execute, require_windows};
use crate::infrastructure::{CommandRunner, Config, ProcessRunner, Product, SystemCommand};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// What a database folder removal deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    pub files: usize,
    pub bytes: u64,
}

pub struct MaintenanceService<C: CommandRunner> {
    runner: C,
    config: Config,
    windows_only: bool,
    hostname: Option<String>,
}

impl MaintenanceService<ProcessRunner> {
    /// Service running real OS commands; command actions need Windows
    pub fn for_this_machine(config: Config) -> Self {
        MaintenanceService {
            runner: ProcessRunner,
            config,
            windows_only: true,
            hostname: None,
        }
    }
}

impl<C: CommandRunner> MaintenanceService<C> {
    /// Service with a custom runner, usable on any platform
    pub fn new(runner: C, config: Config) -> Self {
        MaintenanceService {
            runner,
            config,
            windows_only: false,
            hostname: None,
        }
    }

    /// Use `name` as the current computer name instead of asking the system
    pub fn with_hostname(mut self, name: &str) -> Self {
        self.hostname = Some(name.to_string());
        self
    }

    fn check_platform(&self, feature: &str) -> Result<()> {
        if self.windows_only {
            require_windows(feature)
        } else {
            Ok(())
        }
    }

    /// Rename this computer. Takes effect after a reboot.
    pub fn rename_host(&self, new_name: &str) -> Result<String> {
        let new_name = validate_hostname(new_name)?;
        self.check_platform("Renaming the computer")?;

        let current = match &self.hostname {
            Some(name) => name.clone(),
            None => current_hostname()?,
        };
        if current.eq_ignore_ascii_case(&new_name) {
            return Err(TamioError::Validation(format!(
                "Computer is already named '{}'",
                current
            )));
        }

        execute(&self.runner, &SystemCommand::rename_computer(&current, &new_name))?;
        info!(from = %current, to = %new_name, "Computer renamed, reboot required");
        Ok(new_name)
    }

    pub fn stop_service(&self, service: &str) -> Result<()> {
        let service = Self::service_name(service)?;
        self.check_platform("Stopping services")?;
        execute(&self.runner, &SystemCommand::stop_service(service))?;
        Ok(())
    }

    pub fn disable_service(&self, service: &str) -> Result<()> {
        let service = Self::service_name(service)?;
        self.check_platform("Disabling services")?;
        execute(&self.runner, &SystemCommand::disable_service(service))?;
        Ok(())
    }

    /// Look up a catalog product by name or code, or accept any valid
    /// MSI product code.
    pub fn resolve_product(&self, product: &str) -> Result<Product> {
        Ok(match self.config.find_product(product) {
            Some(known) => Product::new(&known.name, &validate_product_code(&known.code)?),
            None => {
                let code = validate_product_code(product).map_err(|_| {
                    TamioError::Validation(format!(
                        "Unknown product: '{}'. Use 'tamio products' to list the catalog \
                         or pass a product code like {{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}}",
                        product.trim()
                    ))
                })?;
                Product::new(&code, &code)
            }
        })
    }

    /// Silently uninstall a product from the catalog, or any MSI product code.
    pub fn uninstall(&self, product: &str, confirmed: bool) -> Result<Product> {
        let product = self.resolve_product(product)?;

        if !confirmed {
            return Err(TamioError::ConfirmationRequired(format!(
                "uninstalling {} {}",
                product.name, product.code
            )));
        }

        self.check_platform("Uninstalling products")?;
        execute(&self.runner, &SystemCommand::uninstall_product(&product.code))?;
        info!(name = %product.name, code = %product.code, "Product uninstalled");
        Ok(product)
    }

    /// Remove the database folder and everything in it.
    /// Defaults to `database_dir` from the tool settings.
    pub fn delete_database_folder(
        &self,
        path: Option<&Path>,
        confirmed: bool,
    ) -> Result<RemovalSummary> {
        let path = path.unwrap_or(self.config.database_dir.as_path());
        if !path.is_dir() {
            return Err(TamioError::MissingFile(path.to_path_buf()));
        }

        if !confirmed {
            return Err(TamioError::ConfirmationRequired(format!(
                "deleting {}",
                path.display()
            )));
        }

        let mut summary = RemovalSummary::default();
        for entry in WalkDir::new(path).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                summary.files += 1;
                summary.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }

        fs::remove_dir_all(path)?;
        info!(
            path = %path.display(),
            files = summary.files,
            bytes = summary.bytes,
            "Database folder deleted"
        );
        Ok(summary)
    }

    fn service_name(service: &str) -> Result<&str> {
        let service = service.trim();
        if service.is_empty() || service.chars().any(char::is_whitespace) {
            return Err(TamioError::Validation(format!(
                "Invalid service name: '{}'",
                service
            )));
        }
        Ok(service)
    }
}
