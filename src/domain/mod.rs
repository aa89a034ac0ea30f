//! Domain layer - Configuration documents and validation rules

pub mod attributes;
pub mod devices;
pub mod layout;
pub mod menu;
pub mod role;
pub mod settings;
pub mod validators;

pub use devices::{DeviceSettings, PrinterKind};
pub use layout::{HeaderLines, LayoutError};
pub use menu::MenuPatch;
pub use role::DeploymentRole;
pub use settings::{Address, KeyGroup, SettingsRecord};
pub use validators::ValidationError;
