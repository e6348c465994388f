// Config module - Property sources and server settings

mod source;

pub use source::{
    CompositePropertySource, EnvPropertySource, FilePropertySource, MapPropertySource,
    PropertySource,
};

use crate::error::{LogFileError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Log file name property
pub const LOGGING_FILE_NAME: &str = "logging.file.name";

/// Deprecated alias of [`LOGGING_FILE_NAME`]
pub const LOGGING_FILE: &str = "logging.file";

/// Log directory property
pub const LOGGING_FILE_PATH: &str = "logging.file.path";

/// Deprecated alias of [`LOGGING_FILE_PATH`]
pub const LOGGING_PATH: &str = "logging.path";

/// Explicit log file to serve, bypassing the logging properties
pub const EXTERNAL_FILE: &str = "management.endpoint.logfile.external-file";

/// Settings for the HTTP endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Request path the log file is served under
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Serve this file instead of the one named by the logging properties
    #[serde(default)]
    pub external_file: Option<PathBuf>,
}

// Default value functions for serde
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_endpoint_path() -> String {
    "/actuator/logfile".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            endpoint_path: default_endpoint_path(),
            external_file: None,
        }
    }
}

impl ServerConfig {
    /// Load the `[server]` table from a file (supports TOML and JSON).
    ///
    /// A file without a `server` table yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the `[server]` table without validating it.
    ///
    /// For callers that only need `external_file` and never bind.
    pub fn parse_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LogFileError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let config = match extension {
            "toml" => Self::parse_toml(&contents)?,
            "json" => Self::parse_json(&contents)?,
            _ => {
                return Err(LogFileError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        Ok(config)
    }

    fn parse_toml(contents: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ConfigFile {
            #[serde(default)]
            server: ServerConfig,
        }

        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| LogFileError::InvalidConfig(format!("Failed to parse TOML: {}", e)))?;

        Ok(file.server)
    }

    fn parse_json(contents: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ConfigFile {
            #[serde(default)]
            server: ServerConfig,
        }

        let file: ConfigFile = serde_json::from_str(contents)
            .map_err(|e| LogFileError::InvalidConfig(format!("Failed to parse JSON: {}", e)))?;

        Ok(file.server)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.endpoint_path.starts_with('/') {
            return Err(LogFileError::ConfigValidationError(format!(
                "endpoint_path must start with '/': {}",
                self.endpoint_path
            )));
        }

        self.bind_addr()?;
        Ok(())
    }

    /// Parsed listener address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e| {
            LogFileError::ConfigValidationError(format!(
                "Invalid bind address '{}': {}",
                self.bind, e
            ))
        })
    }
}
