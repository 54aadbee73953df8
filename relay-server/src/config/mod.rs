//! Configuration module for relay-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::{BrokerConfig, FileConfig};
use relay_core::config::{EngineConfig, RoutingTable};
use relay_core::publisher::{BasicAuth, RestProxyConfig};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const BROKER_USERNAME_ENV: &str = "RELAY_BROKER_USERNAME";
pub const BROKER_PASSWORD_ENV: &str = "RELAY_BROKER_PASSWORD";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("{0} environment variable not set")]
    MissingCredentials(&'static str),
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub engine: EngineConfig,
    pub broker: RestProxyConfig,
    pub routing: RoutingTable,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Resolve broker credentials from the environment
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.load_str(&config_content, |name| std::env::var(name).ok())
    }

    fn load_str(
        &self,
        content: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        validate(&file_config)?;

        let broker = convert_broker(file_config.broker, env)?;
        let queue_capacity = file_config.engine.queue_capacity.and_then(NonZeroUsize::new);

        if file_config.entities.is_empty() {
            tracing::warn!("No entity types are routed; every change will be skipped");
        }

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            engine: EngineConfig {
                include_type_name_header: file_config.engine.include_type_name_header,
                queue_capacity,
            },
            broker,
            routing: file_config.entities.into_iter().collect(),
        })
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.engine.queue_capacity == Some(0) {
        return Err(ConfigError::ValidationError(
            "engine.queue_capacity must be greater than zero".to_string(),
        ));
    }
    if config.broker.cluster_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "broker.cluster_id must not be empty".to_string(),
        ));
    }
    for (type_name, entry) in &config.entities {
        if entry.routing_id.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "entities.{type_name} has an empty routing_id"
            )));
        }
    }
    Ok(())
}

fn convert_broker(
    broker: BrokerConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<RestProxyConfig, ConfigError> {
    let credentials = if broker.auth {
        let username =
            env(BROKER_USERNAME_ENV).ok_or(ConfigError::MissingCredentials(BROKER_USERNAME_ENV))?;
        Some(BasicAuth {
            username,
            password: env(BROKER_PASSWORD_ENV),
        })
    } else {
        None
    };

    Ok(RestProxyConfig {
        url: broker.url,
        cluster_id: broker.cluster_id,
        credentials,
        timeout: broker.timeout_secs.map(Duration::from_secs),
    })
}
