//! otacheck Firmware Update Query
//!
//! One request, one response, one outcome.
//!
//! Components:
//! - `query` - Form fields sent to the OTA server
//! - `client` - Blocking HTTP exchange
//! - `xml` - Well-formed element tree
//! - `package` - Response interpretation
//! - `outcome` - Query result types

pub mod client;
pub mod outcome;
pub mod package;
pub mod query;
pub mod xml;

pub use client::{QueryError, RawResponse, UpdateClient};
pub use outcome::{FailureReason, QueryOutcome};
pub use package::{interpret, Interpreter, PackageDescriptor};
pub use query::UpdateQuery;

use tracing::error;

use crate::engine::config::Config;

/// Check for a firmware update on behalf of the configured device
pub fn check_for_update(config: &Config) -> QueryOutcome {
    match UpdateClient::new(&config.service) {
        Ok(client) => client.check(&config.device),
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            QueryOutcome::Failed(e.into())
        }
    }
}
