//! Deployment roles of the POS software

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A machine is either the central server or a checkout station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentRole {
    /// Hosts the database and the shared xml/logs folders
    #[default]
    Server,
    /// Reads its settings from a server
    Station,
}

impl DeploymentRole {
    /// Short description shown next to the role name
    pub fn description(&self) -> &'static str {
        match self {
            DeploymentRole::Server => "central configuration, system settings, MEV",
            DeploymentRole::Station => "connects to a server, local computer name",
        }
    }
}

impl FromStr for DeploymentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "server" => Ok(DeploymentRole::Server),
            "station" => Ok(DeploymentRole::Station),
            _ => Err(format!(
                "Invalid role: '{}'. Valid roles are: server, station",
                s
            )),
        }
    }
}

impl fmt::Display for DeploymentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentRole::Server => write!(f, "server"),
            DeploymentRole::Station => write!(f, "station"),
        }
    }
}
