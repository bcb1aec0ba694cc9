//! otacheck Configuration Module
//! Device identity and OTA service settings, loadable from otacheck.config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "otacheck.config.json";

const DEFAULT_ENDPOINT: &str = "https://ota.lenovo.com/ota-server/firmware/query/for-text-desc";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Invalid config format: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub device: DeviceIdentity,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Identity fields the OTA server uses to pick a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub model: String,
    pub device_id: String,
    pub firmware_version: String,
    pub locale: String,
    /// Omitted from the query when absent or empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    pub partner_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Server error code that actually means "no newer firmware"
    #[serde(default = "default_no_update_code")]
    pub no_update_code: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("otacheck/{}", env!("CARGO_PKG_VERSION"))
}

fn default_no_update_code() -> String {
    crate::engine::updater::package::DEFAULT_NO_UPDATE_CODE.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            no_update_code: default_no_update_code(),
        }
    }
}

impl Default for DeviceIdentity {
    /// The built-in device the CLI checks on behalf of
    fn default() -> Self {
        Self {
            model: "TB710FU".to_string(),
            device_id: "HA29117A".to_string(),
            firmware_version: "TB710FU_RF01_250925".to_string(),
            locale: "zh_CN".to_string(),
            country_code: Some("zh_CN".to_string()),
            partner_id: "123456".to_string(),
        }
    }
}

impl DeviceIdentity {
    /// Country code, if one is set and non-empty
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref().filter(|code| !code.is_empty())
    }
}

impl Config {
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path));
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
