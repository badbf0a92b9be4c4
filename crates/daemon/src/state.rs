use std::str::FromStr;
use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "drivefs";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk daemon configuration. Holds settings only; the namespace
/// itself is never written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the API HTTP server
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Default log level for the daemon (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_port() -> u16 {
    5001
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> Result<tracing::Level, StateError> {
        tracing::Level::from_str(&self.log_level)
            .map_err(|_| StateError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the drivefs directory (~/.drivefs)
    pub drivefs_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the drivefs directory path (custom or default ~/.drivefs)
    pub fn drivefs_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Check if the drivefs directory exists
    pub fn exists(custom_path: Option<PathBuf>) -> Result<bool, StateError> {
        let drivefs_dir = Self::drivefs_dir(custom_path)?;
        Ok(drivefs_dir.join(CONFIG_FILE_NAME).exists())
    }

    /// Initialize a new drivefs state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let drivefs_dir = Self::drivefs_dir(custom_path)?;
        let config_path = drivefs_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        let config = config.unwrap_or_default();
        // refuse to write a config the daemon could not start with
        config.log_level()?;

        fs::create_dir_all(&drivefs_dir)?;
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            drivefs_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the drivefs directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let drivefs_dir = Self::drivefs_dir(custom_path)?;
        let config_path = drivefs_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            drivefs_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("drivefs directory not initialized. Run 'drivefs init' first")]
    NotInitialized,

    #[error("drivefs directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
