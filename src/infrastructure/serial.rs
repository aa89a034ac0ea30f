//! Serial ports available for a COM receipt printer

use crate::error::Result;
use serialport::SerialPortInfo;
use tracing::debug;

/// Names of the serial ports on this machine, e.g. `COM1`, `/dev/ttyUSB0`
pub fn list_serial_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    debug!(count = ports.len(), "Enumerated serial ports");
    Ok(port_names(ports))
}

fn port_names(ports: Vec<SerialPortInfo>) -> Vec<String> {
    let mut names: Vec<String> = ports.into_iter().map(|p| p.port_name).collect();
    names.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
    names.dedup();
    names
}

/// Sort COM2 before COM10
fn natural_key(name: &str) -> (String, u32) {
    let digits = name.len() - name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (prefix, number) = name.split_at(name.len() - digits);
    (prefix.to_string(), number.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::SerialPortType;

    fn port(name: &str) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::Unknown,
        }
    }

    #[test]
    fn test_port_names_sorted() {
        let names = port_names(vec![port("COM10"), port("COM2"), port("COM1"), port("COM2")]);
        assert_eq!(names, vec!["COM1", "COM2", "COM10"]);
    }

    #[test]
    fn test_port_names_empty() {
        assert!(port_names(Vec::new()).is_empty());
    }
}
