//! TOML file configuration structures.
//!
//! These structs directly map to the `relay-config.toml` file format.

use indexmap::IndexMap;
use relay_sdk::config::RoutingEntry;
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    pub broker: BrokerConfig,
    /// Routing entries keyed by entity type name.
    #[serde(default)]
    pub entities: IndexMap<String, RoutingEntry>,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub include_type_name_header: bool,
    /// Unbounded when absent.
    pub queue_capacity: Option<usize>,
}

/// Kafka REST proxy connection.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    pub url: Url,
    pub cluster_id: String,
    /// Read basic auth credentials from the environment.
    #[serde(default)]
    pub auth: bool,
    pub timeout_secs: Option<u64>,
}
