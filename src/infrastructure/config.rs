//! # Service Configuration
//!
//! Environment-driven settings for listeners, storage and logging.
//!
//! Values are read from `ADS_`-prefixed environment variables, optionally
//! seeded from a `.env` file. Unset variables fall back to the defaults
//! below.
//!
//! | Variable | Default |
//! |---|---|
//! | `ADS_BIND_HOST` | `0.0.0.0` |
//! | `ADS_REST_PORT` | `8080` |
//! | `ADS_GRPC_PORT` | `50051` |
//! | `ADS_STORAGE` | `memory` |
//! | `ADS_DB_HOST` | `localhost` |
//! | `ADS_DB_PORT` | `5432` |
//! | `ADS_DB_NAME` | `postgres` |
//! | `ADS_DB_USER` | `postgres` |
//! | `ADS_DB_PASSWORD` | empty |
//! | `ADS_DB_MAX_CONNECTIONS` | `5` |
//! | `ADS_LOG_LEVEL` | `info` |
//! | `ADS_LOG_JSON` | `false` |
//!
//! # Examples
//!
//! ```
//! use classified_ads::infrastructure::config::{AppConfig, StorageKind};
//!
//! let config = AppConfig::default()
//!     .with_storage(StorageKind::Postgres)
//!     .with_rest_port(9000);
//!
//! assert_eq!(config.rest_port(), 9000);
//! assert_eq!(config.storage(), StorageKind::Postgres);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Prefix of every environment variable read by [`AppConfig::from_env`].
pub const ENV_PREFIX: &str = "ADS";

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_REST_PORT: u16 = 8080;
const DEFAULT_GRPC_PORT: u16 = 50051;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_NAME: &str = "postgres";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialized.
    #[error("config source error: {0}")]
    Source(#[from] config::ConfigError),

    /// The `.env` file exists but could not be loaded.
    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// A value was read but is not acceptable.
    #[error("config invalid: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Process-local in-memory store.
    #[default]
    Memory,
    /// PostgreSQL database.
    Postgres,
}

impl StorageKind {
    /// Returns the configuration spelling of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::invalid(format!(
                "unknown storage '{other}', expected 'memory' or 'postgres'"
            ))),
        }
    }
}

/// PostgreSQL connection settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Login role.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Upper bound of pooled connections.
    pub max_connections: u32,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            database: DEFAULT_DB_NAME.to_string(),
            username: DEFAULT_DB_USER.to_string(),
            password: String::new(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `classified_ads=debug`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Flat shape of the environment variables.
#[derive(Debug, Deserialize)]
struct RawConfig {
    bind_host: String,
    rest_port: u16,
    grpc_port: u16,
    storage: String,
    db_host: String,
    db_port: u16,
    db_name: String,
    db_user: String,
    db_password: String,
    db_max_connections: u32,
    log_level: String,
    log_json: bool,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    bind_host: String,
    rest_port: u16,
    grpc_port: u16,
    storage: StorageKind,
    postgres: PostgresConfig,
    logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST.to_string(),
            rest_port: DEFAULT_REST_PORT,
            grpc_port: DEFAULT_GRPC_PORT,
            storage: StorageKind::default(),
            postgres: PostgresConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads a `.env` file into the process environment.
    ///
    /// With `None`, a `.env` in the working directory is loaded if present.
    /// An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvFile` if the file cannot be read or parsed.
    pub fn load_dotenv(path: Option<&Path>) -> Result<(), ConfigError> {
        match path {
            Some(path) => dotenvy::from_path(path).map_err(ConfigError::from),
            None => match dotenvy::dotenv() {
                Ok(_) => Ok(()),
                Err(e) if e.not_found() => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Reads the configuration from `ADS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or a value is
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Reads the configuration from an explicit variable map instead of the
    /// process environment. Keys carry the `ADS_` prefix.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX).source(Some(map)))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let raw: RawConfig = config::Config::builder()
            .set_default("bind_host", defaults.bind_host.as_str())?
            .set_default("rest_port", i64::from(defaults.rest_port))?
            .set_default("grpc_port", i64::from(defaults.grpc_port))?
            .set_default("storage", defaults.storage.as_str())?
            .set_default("db_host", defaults.postgres.host.as_str())?
            .set_default("db_port", i64::from(defaults.postgres.port))?
            .set_default("db_name", defaults.postgres.database.as_str())?
            .set_default("db_user", defaults.postgres.username.as_str())?
            .set_default("db_password", defaults.postgres.password.as_str())?
            .set_default(
                "db_max_connections",
                i64::from(defaults.postgres.max_connections),
            )?
            .set_default("log_level", defaults.logging.level.as_str())?
            .set_default("log_json", defaults.logging.json)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        let config = Self {
            bind_host: raw.bind_host,
            rest_port: raw.rest_port,
            grpc_port: raw.grpc_port,
            storage: raw.storage.parse()?,
            postgres: PostgresConfig {
                host: raw.db_host,
                port: raw.db_port,
                database: raw.db_name,
                username: raw.db_user,
                password: raw.db_password,
                max_connections: raw.db_max_connections,
            },
            logging: LoggingConfig {
                level: raw.log_level,
                json: raw.log_json,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for zero ports, colliding ports, an
    /// unparsable bind host or an empty connection pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rest_port == 0 || self.grpc_port == 0 {
            return Err(ConfigError::invalid("listener ports must be non-zero"));
        }
        if self.rest_port == self.grpc_port {
            return Err(ConfigError::invalid(format!(
                "rest and grpc listeners cannot share port {}",
                self.rest_port
            )));
        }
        self.rest_addr()?;
        if self.storage == StorageKind::Postgres && self.postgres.max_connections == 0 {
            return Err(ConfigError::invalid("db_max_connections must be positive"));
        }
        Ok(())
    }

    /// Overrides the storage backend.
    #[must_use]
    pub fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    /// Overrides the REST port.
    #[must_use]
    pub fn with_rest_port(mut self, port: u16) -> Self {
        self.rest_port = port;
        self
    }

    /// Overrides the gRPC port.
    #[must_use]
    pub fn with_grpc_port(mut self, port: u16) -> Self {
        self.grpc_port = port;
        self
    }

    /// Returns the listener interface.
    #[must_use]
    pub fn bind_host(&self) -> &str {
        &self.bind_host
    }

    /// Returns the REST port.
    #[must_use]
    pub fn rest_port(&self) -> u16 {
        self.rest_port
    }

    /// Returns the gRPC port.
    #[must_use]
    pub fn grpc_port(&self) -> u16 {
        self.grpc_port
    }

    /// Returns the storage backend.
    #[must_use]
    pub fn storage(&self) -> StorageKind {
        self.storage
    }

    /// Returns the PostgreSQL settings.
    #[must_use]
    pub fn postgres(&self) -> &PostgresConfig {
        &self.postgres
    }

    /// Returns the logging settings.
    #[must_use]
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Returns the REST listener address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the bind host is not an IP address.
    pub fn rest_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.socket_addr(self.rest_port)
    }

    /// Returns the gRPC listener address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the bind host is not an IP address.
    pub fn grpc_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.socket_addr(self.grpc_port)
    }

    fn socket_addr(&self, port: u16) -> Result<SocketAddr, ConfigError> {
        let ip = self.bind_host.parse().map_err(|e| {
            ConfigError::invalid(format!("invalid bind_host '{}': {e}", self.bind_host))
        })?;
        Ok(SocketAddr::new(ip, port))
    }
}
