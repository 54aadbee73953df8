//! Broker clients.
//!
//! The engine hands each envelope to a [`BrokerClient`] exactly once. Clients
//! report failures but never retry.

mod memory;
mod rest_proxy;

pub use memory::InMemoryBroker;
pub use rest_proxy::{BasicAuth, RestProxyBroker, RestProxyConfig};

use async_trait::async_trait;
use relay_sdk::objects::Envelope;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while handing an envelope to the broker.
#[derive(Debug, Error)]
pub enum PublishError {
    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The broker answered with a non-success status
    #[error("broker rejected record for topic `{topic}` with status {status}: {body}")]
    Rejected {
        topic: String,
        status: u16,
        body: String,
    },

    /// Payload serialization error
    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Produce endpoint could not be built
    #[error("invalid produce URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Sends one record to a broker topic.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    async fn send(&self, envelope: Envelope) -> Result<(), PublishError>;
}

/// Thin front of a [`BrokerClient`] shared by the dispatcher.
#[derive(Clone)]
pub struct Publisher {
    client: Arc<dyn BrokerClient>,
}

impl Publisher {
    pub fn new(client: Arc<dyn BrokerClient>) -> Self {
        Self { client }
    }

    /// Hand the envelope to the broker client. Asynchronous sends that fail
    /// later are the client's concern.
    pub async fn publish(&self, envelope: Envelope) -> Result<(), PublishError> {
        debug!(
            topic = %envelope.topic,
            fields = envelope.payload.len(),
            headers = envelope.headers.len(),
            "Publishing record"
        );
        self.client.send(envelope).await
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher").finish_non_exhaustive()
    }
}
