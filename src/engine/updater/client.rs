//! OTA Query Client
//!
//! Sends one blocking form POST to the OTA server and hands the body to the
//! interpreter. No retries; the configured timeout bounds the whole call.

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info};

use super::outcome::{FailureReason, QueryOutcome};
use super::package::Interpreter;
use super::query::UpdateQuery;
use crate::engine::config::{DeviceIdentity, ServiceConfig};

/// Status and body of a successful exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server responded with HTTP {0}")]
    HttpStatus(u16),
}

impl From<QueryError> for FailureReason {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Transport(e) => Self::Transport(e.to_string()),
            QueryError::HttpStatus(status) => Self::HttpStatus(status),
        }
    }
}

pub struct UpdateClient {
    http_client: reqwest::blocking::Client,
    endpoint: String,
    interpreter: Interpreter,
}

impl UpdateClient {
    pub fn new(service: &ServiceConfig) -> Result<Self, QueryError> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(service.user_agent.as_str())
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: service.endpoint.clone(),
            interpreter: Interpreter::with_no_update_code(service.no_update_code.as_str()),
        })
    }

    /// POST the update query and return the raw response
    ///
    /// Non-200 statuses are errors; their bodies are never read.
    pub fn send(&self, identity: &DeviceIdentity) -> Result<RawResponse, QueryError> {
        let query = UpdateQuery::new(identity);
        info!(
            endpoint = %self.endpoint,
            model = %identity.model,
            firmware = %identity.firmware_version,
            "Checking for firmware update"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .form(query.fields())
            .send()?;

        let status = response.status().as_u16();
        info!(status, "Received OTA server response");
        if status != 200 {
            return Err(QueryError::HttpStatus(status));
        }

        let body = response.text()?;
        Ok(RawResponse { status, body })
    }

    /// Run one complete check; every failure becomes `QueryOutcome::Failed`
    pub fn check(&self, identity: &DeviceIdentity) -> QueryOutcome {
        match self.send(identity) {
            Ok(response) => self.interpreter.interpret(&response.body),
            Err(e) => {
                error!(error = %e, "Firmware query failed");
                QueryOutcome::Failed(e.into())
            }
        }
    }
}
