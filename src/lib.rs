//! tamio - POS server/station configuration tool
//!
//! Edits the POS xml configuration (config.xml, devices.xml, layout.xml,
//! menu.xml), validates merchant data and runs Windows maintenance commands.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Result, TamioError};
