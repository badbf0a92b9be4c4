use std::path::PathBuf;

use crate::state::{AppConfig, StateError};

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Port for the API HTTP server
    pub api_port: u16,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Build a service config from the on-disk app config
    pub fn from_app_config(config: &AppConfig) -> Result<Self, StateError> {
        Ok(Self {
            api_port: config.api_port,
            log_level: config.log_level()?,
            log_dir: None,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: AppConfig::default().api_port,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
