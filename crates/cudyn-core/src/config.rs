use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;

/// Top-level cudyn configuration, loaded from cudyn.toml.
///
/// None of these settings influence which driver library is opened; the
/// library name is fixed per platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CudynConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by CUDYN_LOG
    #[serde(default = "default_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Oldest acceptable driver version, e.g. "11.0" or "12.2.1"
    pub min_driver_version: Option<String>,
    /// Optional entry points this deployment cannot do without
    #[serde(default)]
    pub required_capabilities: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl CudynConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!("loaded configuration from {}", path);
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, CoreError> {
        let config: CudynConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &str) -> Self {
        Self::load(path).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.logging.filter.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "logging.filter must not be empty".to_string(),
            ));
        }
        if let Some(name) = self
            .verify
            .required_capabilities
            .iter()
            .find(|name| name.trim().is_empty())
        {
            return Err(CoreError::ConfigError(format!(
                "verify.required_capabilities contains an empty name: {:?}",
                name
            )));
        }
        Ok(())
    }
}

/// Returns the default config file path based on platform conventions.
/// Search order:
/// 1. System-wide config: `%PROGRAMDATA%\cudyn\cudyn.toml` (Windows) or
///    `/etc/cudyn/cudyn.toml` (elsewhere)
/// 2. Local fallback: `./cudyn.toml`
pub fn default_config_path() -> String {
    #[cfg(windows)]
    {
        let programdata = std::env::var("PROGRAMDATA")
            .unwrap_or_else(|_| r"C:\ProgramData".to_string());
        let system_path = format!(r"{}\cudyn\cudyn.toml", programdata);
        if std::path::Path::new(&system_path).exists() {
            return system_path;
        }
    }
    #[cfg(not(windows))]
    {
        let system_path = "/etc/cudyn/cudyn.toml";
        if std::path::Path::new(system_path).exists() {
            return system_path.to_string();
        }
    }
    "cudyn.toml".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}
