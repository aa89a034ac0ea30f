use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};
use std::str::FromStr;
use tamio::application::{
    apply_setup, check_server::check_server, init::init, ConfigService, MaintenanceService,
    PrinterService, PrinterUpdate, ServerSetup, StationService,
};
use tamio::cli::commands::{DatabaseAction, HostAction, ServiceAction, StationAction, ValueKind};
use tamio::cli::{
    format_device_settings, format_file_size, format_port_list, format_product_list,
    format_server_check, format_settings, format_setup_report, Cli, Commands,
};
use tamio::domain::validators;
use tamio::domain::{DeploymentRole, KeyGroup, PrinterKind};
use tamio::error::{Result, TamioError};
use tamio::infrastructure::logging::init_logging;
use tamio::infrastructure::serial::list_serial_ports;
use tamio::infrastructure::{Config, XmlConfigStore};
use tracing::warn;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::discover(cli.config.as_deref(), &cwd)?;
    if let Some(dir) = cli.xml_dir {
        config.xml_dir = dir;
    }

    if let Err(e) = init_logging(&config.log_dir, cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    let store = XmlConfigStore::new(config.xml_dir.clone());

    match cli.command {
        Commands::Init { force } => {
            let written = init(&config.xml_dir, force)?;
            println!(
                "Initialized {} for a {} ({})",
                config.xml_dir.display(),
                config.role,
                config.role.description()
            );
            for path in written {
                println!("  created {}", path.display());
            }
            Ok(())
        }
        Commands::Config {
            key,
            value,
            list,
            group,
        } => {
            let service = ConfigService::new(store);

            if list {
                let group = KeyGroup::from_str(&group).map_err(TamioError::Config)?;
                print!("{}", format_settings(&service.list(group)?));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    let stored = service.set(&k, &v)?;
                    println!("Set {} = {}", k, stored);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: tamio config [--list [--group general|mev|all] | <key> [<value>]]");
                Ok(())
            }
        }
        Commands::Apply { setup } => {
            if config.role == DeploymentRole::Station {
                warn!("Applying a server setup on a machine configured as a station");
            }
            let setup = ServerSetup::load(&setup)?;
            let report = apply_setup(&store, &setup)?;
            print!("{}", format_setup_report(&report));
            Ok(())
        }
        Commands::Printer {
            kind,
            ip,
            com,
            baud,
            list_ports,
        } => {
            if list_ports {
                print!("{}", format_port_list(&list_serial_ports()?));
                return Ok(());
            }

            let service = PrinterService::new(store);
            let update = PrinterUpdate {
                kind: kind
                    .as_deref()
                    .map(PrinterKind::from_str)
                    .transpose()
                    .map_err(TamioError::Validation)?,
                ip,
                com,
                baud,
            };

            let devices = if update.is_empty() {
                service.show()?
            } else {
                service.set(update)?
            };
            print!("{}", format_device_settings(&devices));
            Ok(())
        }
        Commands::Station { action } => match action {
            StationAction::Point {
                server,
                font_size,
                list_height,
            } => {
                if config.role == DeploymentRole::Server {
                    warn!("Pointing a machine configured as a server to another server");
                }
                let service = StationService::new(store);
                service.point_to_server(&server, font_size, list_height)?;
                println!("Station now uses server {}", server.trim());
                Ok(())
            }
        },
        Commands::Host { action } => match action {
            HostAction::Rename { name } => {
                let service = MaintenanceService::for_this_machine(config);
                let name = service.rename_host(&name)?;
                println!("Computer renamed to '{}'. Restart required.", name);
                Ok(())
            }
        },
        Commands::Service { action } => {
            let service = MaintenanceService::for_this_machine(config);
            match action {
                ServiceAction::Stop { name } => {
                    service.stop_service(&name)?;
                    println!("Service '{}' stopped", name.trim());
                }
                ServiceAction::Disable { name } => {
                    service.disable_service(&name)?;
                    println!("Service '{}' disabled", name.trim());
                }
            }
            Ok(())
        }
        Commands::Uninstall { product, yes } => {
            let service = MaintenanceService::for_this_machine(config);
            let target = service.resolve_product(&product)?;
            let confirmed =
                yes || confirm(&format!("Uninstall {} {}?", target.name, target.code))?;
            let removed = service.uninstall(&target.code, confirmed)?;
            println!("Uninstalled {} {}", removed.name, removed.code);
            Ok(())
        }
        Commands::Products => {
            print!("{}", format_product_list(&config.products));
            Ok(())
        }
        Commands::CheckServer { ip, timeout } => {
            let check = check_server(&config, &ip, timeout)?;
            print!("{}", format_server_check(&check));
            if check.is_ok() {
                Ok(())
            } else {
                Err(TamioError::Network(format!(
                    "Server {} is missing shares: {}",
                    check.address,
                    check.missing_shares.join(", ")
                )))
            }
        }
        Commands::Database { action } => match action {
            DatabaseAction::Delete { path, yes } => {
                let target = path.clone().unwrap_or_else(|| config.database_dir.clone());
                let confirmed = yes
                    || (target.is_dir()
                        && confirm(&format!("Delete {} and everything in it?", target.display()))?);
                let service = MaintenanceService::for_this_machine(config);
                let summary = service.delete_database_folder(path.as_deref(), confirmed)?;
                println!(
                    "Deleted {} files ({})",
                    summary.files,
                    format_file_size(summary.bytes)
                );
                Ok(())
            }
        },
        Commands::Validate { kind, value } => {
            let normalized = match kind {
                ValueKind::Ip => validators::validate_ip_address(&value),
                ValueKind::Postal => validators::validate_postal_code(&value),
                ValueKind::Gst => validators::validate_tax_number(&value, "GST number"),
                ValueKind::Qst => validators::validate_tax_number(&value, "QST number"),
                ValueKind::Establishment => validators::validate_establishment_number(&value),
                ValueKind::Hostname => validators::validate_hostname(&value),
                ValueKind::Sector => validators::validate_mev_sector(&value),
                ValueKind::Product => validators::validate_product_code(&value),
                ValueKind::Server => validators::validate_server_address(&value),
            }?;
            println!("{}", normalized);
            Ok(())
        }
    }
}

/// Ask a yes/no question on an interactive terminal; `false` otherwise.
fn confirm(question: &str) -> Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }

    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "o" | "oui"))
}
