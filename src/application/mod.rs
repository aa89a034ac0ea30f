//! Application layer - Use cases and orchestration

pub mod apply_setup;
pub mod check_server;
pub mod init;
pub mod maintenance;
pub mod manage_config;
pub mod manage_printer;
pub mod station;

pub use apply_setup::{apply_setup, ServerSetup, SetupReport};
pub use maintenance::{MaintenanceService, RemovalSummary};
pub use manage_config::ConfigService;
pub use manage_printer::{PrinterService, PrinterUpdate};
pub use station::StationService;
