//! Error types for tamio

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for tamio
#[derive(Debug, Error)]
pub enum TamioError {
    #[error("File not found: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Command '{program}' failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Command '{program}' timed out after {}s", timeout.as_secs())]
    Timeout { program: String, timeout: Duration },

    #[error("Not supported on this system: {0}")]
    Unsupported(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Layout error: {0}")]
    Layout(#[from] crate::domain::LayoutError),

    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl From<crate::domain::ValidationError> for TamioError {
    fn from(err: crate::domain::ValidationError) -> Self {
        TamioError::Validation(err.to_string())
    }
}

impl TamioError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TamioError::MissingFile(_) => 2,
            TamioError::Validation(_) => 3,
            TamioError::CommandFailed { .. } | TamioError::Timeout { .. } => 4,
            TamioError::Network(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TamioError::MissingFile(path) => {
                format!(
                    "File not found: {}\n\n\
                    Suggestions:\n\
                    • Run 'tamio init' to create the default configuration files\n\
                    • Check the POS xml directory with --xml-dir or TAMIO_XML_DIR\n\
                    • Copy the file from the server's xml share",
                    path.display()
                )
            }
            TamioError::Network(msg) => {
                format!(
                    "{}\n\n\
                    Check that:\n\
                    • The server is powered on\n\
                    • The IP address is correct\n\
                    • The Windows firewall allows port 445 (SMB)\n\
                    • The xml and logs folders are shared on the server",
                    msg
                )
            }
            TamioError::CommandFailed { program, .. } | TamioError::Timeout { program, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Run tamio from an elevated (administrator) prompt\n\
                    • Check that '{}' is available on this machine\n\
                    • See the log file for the full command output",
                    self, program
                )
            }
            TamioError::ConfirmationRequired(msg) => {
                format!("{}\n\nRe-run the command with --yes to proceed.", msg)
            }
            TamioError::Validation(msg) => {
                if msg.contains("postal code") {
                    format!("{}\n\nExpected format: A1A 1A1 (e.g., H1A 2B3)", msg)
                } else if msg.contains("product code") {
                    format!(
                        "{}\n\nExpected format: {{12345678-1234-1234-1234-123456789ABC}}\n\
                        Use 'tamio products' to list known products",
                        msg
                    )
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TamioError
pub type Result<T> = std::result::Result<T, TamioError>;
