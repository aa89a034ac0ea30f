//! Output formatting utilities

use crate::application::SetupReport;
use crate::domain::{DeviceSettings, SettingsRecord};
use crate::infrastructure::network::ServerCheck;
use crate::infrastructure::Product;

const SIZE_UNITS: [&str; 4] = ["o", "Ko", "Mo", "Go"];

/// Human-readable size with one decimal, in 1024 steps up to `To`.
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} To", size)
}

/// Format settings as `key = value` lines, keys aligned.
pub fn format_settings(record: &SettingsRecord) -> String {
    if record.is_empty() {
        return "No settings found".to_string();
    }

    let width = record.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (key, value) in record.iter() {
        output.push_str(&format!("{:<width$} = {}\n", key, value, width = width));
    }
    output
}

pub fn format_device_settings(devices: &DeviceSettings) -> String {
    format!(
        "kind     = {}\nip       = {}\ncom      = {}\nbaud     = {}\nprotocol = {}\n",
        devices.kind(),
        devices.ip,
        devices.com,
        devices.baud,
        devices.protocol
    )
}

pub fn format_product_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products configured".to_string();
    }

    let width = products.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let mut output = String::new();
    for product in products {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            product.name,
            product.code,
            width = width
        ));
    }
    output
}

pub fn format_port_list(ports: &[String]) -> String {
    if ports.is_empty() {
        return "No serial ports found".to_string();
    }

    let mut output = String::new();
    for port in ports {
        output.push_str(&format!("{}\n", port));
    }
    output
}

pub fn format_setup_report(report: &SetupReport) -> String {
    let mut output = String::new();

    if !report.saved.is_empty() {
        output.push_str(&format!("Saved: {}\n", report.saved.join(", ")));
    }

    if !report.not_updated.is_empty() {
        output.push_str("Not updated:\n");
        for (file, reason) in &report.not_updated {
            output.push_str(&format!("  {}: {}\n", file, reason));
        }
    }

    if !report.missing_keys.is_empty() {
        output.push_str(&format!(
            "Keys missing from config.xml: {}\n",
            report.missing_keys.join(", ")
        ));
    }

    if report.is_complete() {
        output.push_str("Configuration saved successfully\n");
    }

    output
}

pub fn format_server_check(check: &ServerCheck) -> String {
    let mut output = format!("Server {} answers on port {}\n", check.address, check.port);
    for share in &check.missing_shares {
        output.push_str(&format!("Share '{}' is missing or not accessible\n", share));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.0 o");
        assert_eq!(format_file_size(1023), "1023.0 o");
        assert_eq!(format_file_size(1536), "1.5 Ko");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 Mo");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 Go");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2.0 To");
    }

    #[test]
    fn test_format_empty_settings() {
        assert_eq!(format_settings(&SettingsRecord::new()), "No settings found");
    }

    #[test]
    fn test_format_settings_aligned() {
        let mut record = SettingsRecord::new();
        record.set("Server", "10.0.0.1");
        record.set("GUI_Font_Size", "12");

        let output = format_settings(&record);
        assert_eq!(output, "GUI_Font_Size = 12\nServer        = 10.0.0.1\n");
    }

    #[test]
    fn test_format_product_list() {
        let products = vec![
            Product::new("Paymentree", "{7691B95A-0DCC-423E-A583-C2B8AE7DE260}"),
            Product::new("TAP", "{F3C4B17F-3A6F-4E4B-97B2-6DBDDFE6F200}"),
        ];

        let output = format_product_list(&products);
        assert!(output.contains("Paymentree  {7691B95A-0DCC-423E-A583-C2B8AE7DE260}"));
        assert!(output.contains("TAP         {F3C4B17F"));
        assert_eq!(format_product_list(&[]), "No products configured");
    }

    #[test]
    fn test_format_port_list() {
        let ports = vec!["COM1".to_string(), "COM3".to_string()];
        assert_eq!(format_port_list(&ports), "COM1\nCOM3\n");
        assert_eq!(format_port_list(&[]), "No serial ports found");
    }

    #[test]
    fn test_format_setup_report() {
        let complete = SetupReport {
            saved: vec!["config.xml".to_string(), "devices.xml".to_string()],
            ..SetupReport::default()
        };
        let output = format_setup_report(&complete);
        assert!(output.contains("Saved: config.xml, devices.xml"));
        assert!(output.contains("Configuration saved successfully"));

        let partial = SetupReport {
            saved: vec!["config.xml".to_string()],
            not_updated: vec![("menu.xml".to_string(), "File not found".to_string())],
            missing_keys: vec!["MEV_Zip".to_string()],
        };
        let output = format_setup_report(&partial);
        assert!(output.contains("  menu.xml: File not found"));
        assert!(output.contains("Keys missing from config.xml: MEV_Zip"));
        assert!(!output.contains("successfully"));
    }

    #[test]
    fn test_format_server_check() {
        let check = ServerCheck {
            address: "192.168.1.2".to_string(),
            port: 445,
            missing_shares: vec!["logs".to_string()],
        };
        let output = format_server_check(&check);
        assert!(output.contains("Server 192.168.1.2 answers on port 445"));
        assert!(output.contains("Share 'logs' is missing"));
    }
}
