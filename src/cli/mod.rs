//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_device_settings, format_file_size, format_port_list, format_product_list,
    format_server_check, format_settings, format_setup_report,
};
