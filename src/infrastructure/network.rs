//! Server reachability checks

use crate::domain::validators::validate_ip_address;
use crate::error::{Result, TamioError};
use std::net::{IpAddr, SocketAddr, TcpStream};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// SMB, used by the xml and logs shares
pub const SMB_PORT: u16 = 445;

/// Shares a POS server must expose
pub const REQUIRED_SHARES: [&str; 2] = ["xml", "logs"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCheck {
    pub address: String,
    pub port: u16,
    /// Shares that could not be opened. Only checked on Windows.
    pub missing_shares: Vec<String>,
}

impl ServerCheck {
    pub fn is_ok(&self) -> bool {
        self.missing_shares.is_empty()
    }
}

/// UNC path of a share on `address`
pub fn share_path(address: &str, share: &str) -> PathBuf {
    PathBuf::from(format!(r"\\{}\{}", address, share))
}

/// Connect to the SMB port of `address`, then look for the required shares.
pub fn check_server(address: &str, timeout: Duration) -> Result<ServerCheck> {
    check_server_on(address, SMB_PORT, timeout, cfg!(windows))
}

pub fn check_server_on(
    address: &str,
    port: u16,
    timeout: Duration,
    check_shares: bool,
) -> Result<ServerCheck> {
    let address = validate_ip_address(address)?;
    let ip: IpAddr = address
        .parse()
        .map_err(|e| TamioError::Validation(format!("Invalid IP address: {}", e)))?;

    info!(%address, port, "Testing connection");
    match TcpStream::connect_timeout(&SocketAddr::new(ip, port), timeout) {
        Ok(_) => info!(%address, port, "Port reachable"),
        Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
            return Err(TamioError::Network(format!(
                "Timed out: server {} does not answer on port {}",
                address, port
            )));
        }
        Err(e) => {
            return Err(TamioError::Network(format!(
                "Cannot connect to port {} on {}: {}",
                port, address, e
            )));
        }
    }

    let mut missing_shares = Vec::new();
    if check_shares {
        for share in REQUIRED_SHARES {
            let path = share_path(&address, share);
            if path.exists() {
                info!(share = %path.display(), "Share accessible");
            } else {
                warn!(share = %path.display(), "Share missing or inaccessible");
                missing_shares.push(share.to_string());
            }
        }
    }

    Ok(ServerCheck {
        address,
        port,
        missing_shares,
    })
}
