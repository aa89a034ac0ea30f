//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tamio")]
#[command(about = "POS server and station configuration tool", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Tool settings file (default: TAMIO_CONFIG, then ./tamio.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// POS xml directory (overrides the settings file and TAMIO_XML_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub xml_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create default config.xml and devices.xml in the xml directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify config.xml settings
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List the settings of a group
        #[arg(short, long)]
        list: bool,

        /// Key group to list (general, mev, all)
        #[arg(short, long, default_value = "general")]
        group: String,
    },

    /// Apply a server setup file (settings, MEV, printer, layout, menu)
    Apply {
        /// Setup file in TOML
        setup: PathBuf,
    },

    /// Show or change the receipt printer
    Printer {
        /// Connection kind (network, serial)
        #[arg(short, long)]
        kind: Option<String>,

        /// Printer IP address
        #[arg(long)]
        ip: Option<String>,

        /// Serial port, e.g. COM1
        #[arg(long)]
        com: Option<String>,

        /// Serial baud rate
        #[arg(long)]
        baud: Option<String>,

        /// List the serial ports present on this machine
        #[arg(long, conflicts_with_all = ["kind", "ip", "com", "baud"])]
        list_ports: bool,
    },

    /// Station configuration
    Station {
        #[command(subcommand)]
        action: StationAction,
    },

    /// Computer name
    Host {
        #[command(subcommand)]
        action: HostAction,
    },

    /// Stop or disable a Windows service
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },

    /// Silently uninstall a catalog product or an MSI product code
    Uninstall {
        /// Product name from 'tamio products' or a product code
        product: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List the uninstallable product catalog
    Products,

    /// Test that a server answers on the SMB port and exposes its shares
    CheckServer {
        /// Server IP address
        ip: String,

        /// Connection timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Database folder maintenance
    Database {
        #[command(subcommand)]
        action: DatabaseAction,
    },

    /// Check a value without saving it
    Validate {
        /// What the value is
        #[arg(value_enum)]
        kind: ValueKind,

        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum StationAction {
    /// Point this station at a server
    Point {
        /// Server IP address or name
        server: String,

        /// Interface font size
        #[arg(long)]
        font_size: Option<u32>,

        /// Height of list rows
        #[arg(long)]
        list_height: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HostAction {
    /// Rename this computer (reboot required)
    Rename { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ServiceAction {
    /// Stop a running service
    Stop { name: String },

    /// Prevent a service from starting
    Disable { name: String },
}

#[derive(Subcommand, Debug)]
pub enum DatabaseAction {
    /// Delete the database folder and everything in it
    Delete {
        /// Folder to delete (default: database_dir from the settings)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Ip,
    Postal,
    Gst,
    Qst,
    Establishment,
    Hostname,
    Sector,
    Product,
    Server,
}
