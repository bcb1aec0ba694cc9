//! Query Outcome
//!
//! The single result every firmware check resolves to.

use super::package::PackageDescriptor;
use thiserror::Error;

/// Result of one firmware check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Server has nothing newer for this device
    NoUpdate,
    /// A newer package is offered
    Available(PackageDescriptor),
    /// The check could not be completed
    Failed(FailureReason),
}

/// Why a check failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Server responded with HTTP {0}")]
    HttpStatus(u16),
    #[error("Invalid XML response: {0}")]
    Parse(String),
    #[error("Server error {code}: {message}")]
    Server { code: String, message: String },
    #[error("Response did not contain a firmware version")]
    MalformedResponse,
}

impl QueryOutcome {
    pub fn package(&self) -> Option<&PackageDescriptor> {
        match self {
            Self::Available(package) => Some(package),
            Self::NoUpdate | Self::Failed(_) => None,
        }
    }

    pub fn is_update_available(&self) -> bool {
        self.package().is_some()
    }
}
