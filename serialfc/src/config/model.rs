// src/config/model.rs

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::port::PortProfile;

/// Top-level runtime config (`serialfc.toml`)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub port:    PortConfig,
    #[serde(default)]
    pub profile: PortProfile,
}

/// Mirror of the `[logging]` table
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]            pub enable: bool,
    #[serde(default)]            pub file:   Option<String>,
    #[serde(default = "default_level")] pub level: String,
}
fn default_level() -> String { "INFO".into() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enable: false, file: None, level: default_level() }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match self.level.to_uppercase().as_str() {
            "OFF"   => Ok(LevelFilter::Off),
            "ERROR" => Ok(LevelFilter::Error),
            "WARN"  => Ok(LevelFilter::Warn),
            "INFO"  => Ok(LevelFilter::Info),
            "DEBUG" => Ok(LevelFilter::Debug),
            "TRACE" => Ok(LevelFilter::Trace),
            _       => Err(ConfigError::InvalidLevel(self.level.clone())),
        }
    }
}

/// Mirror of the `[port]` table; `path` wins over `number`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortConfig {
    #[serde(default)] pub number: Option<u32>,
    #[serde(default)] pub path:   Option<String>,
}

impl PortConfig {
    pub fn device_path(&self) -> Result<String, ConfigError> {
        match (&self.path, self.number) {
            (Some(path), _)      => Ok(path.clone()),
            (None, Some(number)) => Ok(shared::constants::device_path(number)),
            (None, None)         => Err(ConfigError::MissingPort),
        }
    }
}

/// All the ways config loading can go wrong
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("[port] needs either `number` or `path`")]
    MissingPort,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
