//! Infrastructure layer - Files, processes and network

pub mod config;
pub mod logging;
pub mod network;
pub mod serial;
pub mod store;
pub mod system;

pub use config::{Config, Product};
pub use store::{ConfigRepository, SaveOutcome, XmlConfigStore};
pub use system::{CommandOutput, CommandRunner, ProcessRunner, SystemCommand};
