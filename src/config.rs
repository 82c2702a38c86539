//! Service configuration loaded from YAML with environment overrides.

use crate::task::adapters::postgres::PoolSettings;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding `database.url`.
pub const DATABASE_URL_VAR: &str = "TASKD_DATABASE_URL";

/// Environment variable overriding `listen.port`.
pub const PORT_VAR: &str = "TASKD_PORT";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot open config file '{0}': {1}")]
    Opening(PathBuf, std::io::Error),

    /// The YAML document is malformed or misses required keys.
    #[error("format error when reading config: {0}")]
    Format(#[from] serde_yaml::Error),

    /// An environment override holds an unusable value.
    #[error("invalid value '{value}' for {name}")]
    InvalidOverride {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The listen host is not an IP address.
    #[error("invalid listen host '{0}'")]
    InvalidHost(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Pool size upper bound.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds a request may wait for a pooled connection.
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
    /// Apply the embedded schema migration at startup.
    #[serde(default)]
    pub apply_migrations: bool,
}

/// Log output settings. `TASKD_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// Default `EnvFilter` directive.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub structured: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            structured: false,
        }
    }
}

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    pub listen: ListenConfig,
    /// Task store database.
    pub database: DatabaseConfig,
    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_connection_timeout_secs() -> u64 {
    5
}

fn default_level() -> String {
    "info".to_owned()
}

impl AppConfig {
    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Format`] for malformed documents.
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Reads and parses a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Opening`] when the file cannot be read and
    /// [`ConfigError::Format`] when it cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_path = path.as_ref();
        let contents = std::fs::read_to_string(file_path)
            .map_err(|err| ConfigError::Opening(file_path.to_owned(), err))?;
        Self::from_yaml(&contents)
    }

    /// Applies overrides looked up by variable name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] when `TASKD_PORT` is not a
    /// port number.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            self.database.url = url;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.listen.port = port.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                name: PORT_VAR,
                value: port,
            })?;
        }
        Ok(())
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::apply_overrides`].
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] when `listen.host` is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .listen
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.listen.host.clone()))?;
        Ok(SocketAddr::new(ip, self.listen.port))
    }

    /// Returns the pool settings derived from the database section.
    #[must_use]
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            checkout_timeout: Duration::from_secs(self.database.connection_timeout_secs),
        }
    }
}
