//! Stateless format checks for operator input.
//!
//! Every validator trims its input and, on success, returns the canonical
//! form that should be written to the configuration files.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Accepted MEV business sectors.
pub const MEV_SECTORS: [&str; 3] = ["RES", "BAR", "CDR"];

/// Longest NetBIOS computer name Windows accepts.
pub const MAX_HOSTNAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type ValidationResult = Result<String, ValidationError>;

fn ipv4_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$").unwrap())
}

fn postal_code_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Z][0-9][A-Z][0-9][A-Z][0-9]$").unwrap())
}

fn hostname_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9-]+$").unwrap())
}

fn guid_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"^\{?([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})\}?$",
        )
        .unwrap()
    })
}

/// Dotted IPv4 address, each octet 0-255. Leading zeros are dropped
/// (`192.168.001.010` becomes `192.168.1.10`).
pub fn validate_ip_address(ip: &str) -> ValidationResult {
    let ip = ip.trim();
    if ip.is_empty() {
        return Err(ValidationError::new("IP address", "cannot be empty"));
    }

    let captures = ipv4_regex()
        .captures(ip)
        .ok_or_else(|| ValidationError::new("IP address", format!("'{}' is not a.b.c.d", ip)))?;

    let mut octets = Vec::with_capacity(4);
    for octet in captures.iter().skip(1).flatten() {
        let value: u8 = octet.as_str().parse().map_err(|_| {
            ValidationError::new("IP address", "octets must be between 0 and 255")
        })?;
        octets.push(value.to_string());
    }

    Ok(octets.join("."))
}

/// Canadian postal code, returned as `A1A 1A1`.
pub fn validate_postal_code(postal_code: &str) -> ValidationResult {
    let compact = postal_code.trim().to_uppercase().replace(' ', "");

    if postal_code_regex().is_match(&compact) {
        Ok(format!("{} {}", &compact[..3], &compact[3..]))
    } else {
        Err(ValidationError::new(
            "postal code",
            format!("'{}' does not match A1A 1A1 (e.g., H1A 2B3)", postal_code.trim()),
        ))
    }
}

/// GST/QST registration number: exactly nine digits.
pub fn validate_tax_number(tax_number: &str, field_name: &str) -> ValidationResult {
    digits_field(tax_number, field_name, 9)
}

/// MEV establishment (file) number: exactly six digits.
pub fn validate_establishment_number(number: &str) -> ValidationResult {
    digits_field(number, "establishment number", 6)
}

fn digits_field(value: &str, field_name: &str, len: usize) -> ValidationResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field_name, "cannot be empty"));
    }

    if value.len() != len || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            field_name,
            format!("must contain exactly {} digits", len),
        ));
    }

    Ok(value.to_string())
}

/// Windows computer name.
pub fn validate_hostname(hostname: &str) -> ValidationResult {
    let hostname = hostname.trim();
    if hostname.is_empty() {
        return Err(ValidationError::new("computer name", "cannot be empty"));
    }

    if hostname.len() > MAX_HOSTNAME_LEN {
        return Err(ValidationError::new(
            "computer name",
            format!("cannot exceed {} characters", MAX_HOSTNAME_LEN),
        ));
    }

    if !hostname_regex().is_match(hostname) {
        return Err(ValidationError::new(
            "computer name",
            "may only contain letters, digits and hyphens",
        ));
    }

    if hostname.starts_with('-') || hostname.ends_with('-') {
        return Err(ValidationError::new(
            "computer name",
            "cannot start or end with a hyphen",
        ));
    }

    Ok(hostname.to_string())
}

/// MEV sector code, upper-cased.
pub fn validate_mev_sector(sector: &str) -> ValidationResult {
    let sector = sector.trim().to_uppercase();
    if MEV_SECTORS.contains(&sector.as_str()) {
        Ok(sector)
    } else {
        Err(ValidationError::new(
            "MEV sector",
            format!("'{}'; accepted values: {}", sector, MEV_SECTORS.join(", ")),
        ))
    }
}

/// MSI product code. Returned upper-cased and wrapped in braces, the form
/// `msiexec` prints in its own logs.
pub fn validate_product_code(code: &str) -> ValidationResult {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::new("product code", "cannot be empty"));
    }

    let captures = guid_regex().captures(code).ok_or_else(|| {
        ValidationError::new("product code", format!("'{}' is not a GUID", code))
    })?;

    // Braces must be balanced
    if code.starts_with('{') != code.ends_with('}') {
        return Err(ValidationError::new(
            "product code",
            format!("'{}' has unbalanced braces", code),
        ));
    }

    Ok(format!("{{{}}}", captures[1].to_uppercase()))
}

/// Server or database address: an IPv4 address or a computer name.
pub fn validate_server_address(address: &str) -> ValidationResult {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::new("server address", "cannot be empty"));
    }

    if address.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return validate_ip_address(address);
    }

    validate_hostname(address).map_err(|e| ValidationError::new("server address", e.reason))
}
