//! # Logging
//!
//! Installs the global `tracing` subscriber.

use crate::infrastructure::config::{ConfigError, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Builds the event filter. `RUST_LOG` wins over the configured level.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` if the configured directive does not parse.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            ConfigError::invalid(format!("invalid log level '{}': {e}", config.level))
        }),
    }
}

/// Installs the global subscriber, human-readable or JSON.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` if the filter does not parse or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| ConfigError::invalid(format!("tracing init failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_is_rejected() {
        let config = LoggingConfig {
            level: "classified_ads=loud".to_string(),
            json: false,
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(env_filter(&config).is_err());
        }
    }

    #[test]
    fn default_level_parses() {
        assert!(env_filter(&LoggingConfig::default()).is_ok());
    }
}
