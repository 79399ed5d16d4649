//! Server Configuration
//!
//! Layered as: built-in defaults, TOML file, `ROOMCAST_*` environment.
//! Command line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Config file read from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "roomcast.toml";

/// Prefix for environment overrides, e.g. `ROOMCAST_PORT=8080`
pub const ENV_PREFIX: &str = "ROOMCAST_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-connection outbound queue capacity
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_outbound_buffer() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            outbound_buffer: default_outbound_buffer(),
        }
    }
}

impl ServerConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX));

        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outbound_buffer == 0 {
            return Err(ConfigError::Invalid(
                "outbound_buffer must be greater than 0".to_string(),
            ));
        }
        if self.host.is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_figment(Figment::from(Serialized::defaults(
            ServerConfig::default(),
        )))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.outbound_buffer, 64);
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roomcast.toml");
        std::fs::write(&path, "port = 9000\noutbound_buffer = 8\n").unwrap();

        let config = ServerConfig::from_figment(
            Figment::from(Serialized::defaults(ServerConfig::default())).merge(Toml::file(&path)),
        )
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.outbound_buffer, 8);
    }

    #[test]
    fn test_explicit_missing_file_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ServerConfig::load(Some(&missing)),
            Err(ConfigError::MissingFile(p)) if p == missing
        ));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let config = ServerConfig {
            outbound_buffer: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_type_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roomcast.toml");
        std::fs::write(&path, "port = \"high\"\n").unwrap();

        let result = ServerConfig::from_figment(
            Figment::from(Serialized::defaults(ServerConfig::default())).merge(Toml::file(&path)),
        );
        assert!(matches!(result, Err(ConfigError::Figment(_))));
    }
}
