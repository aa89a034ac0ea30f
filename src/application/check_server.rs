//! Server reachability use case

use crate::error::Result;
use crate::infrastructure::network::{self, ServerCheck};
use crate::infrastructure::Config;
use std::time::Duration;

/// Check the server at `address`, using `timeout_secs` or the configured
/// `server_check_timeout_secs`.
pub fn check_server(
    config: &Config,
    address: &str,
    timeout_secs: Option<u64>,
) -> Result<ServerCheck> {
    let secs = timeout_secs.unwrap_or(config.server_check_timeout_secs).max(1);
    network::check_server(address, Duration::from_secs(secs))
}
