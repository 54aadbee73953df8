//! Dispatcher processor.
//!
//! The Dispatcher is responsible for:
//! - Receiving `CommittedChange` from the dispatch queue, one at a time
//! - Looking up the routing entry of the entity type
//! - Flattening the entity and releasing it
//! - Wrapping the payload in an envelope and handing it to the publisher
//!
//! A failing change is logged and skipped; it never stops the worker.

use crate::config::RoutingTable;
use crate::envelope::EnvelopeBuilder;
use crate::events::{ChangeReceiver, CommittedChange};
use crate::mapping::{MappingError, flatten};
use crate::publisher::{PublishError, Publisher};
use kanau::processor::Processor;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Errors that abandon the dispatch of one change.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to flatten entity: {0}")]
    Mapping(#[from] MappingError),

    #[error("failed to build envelope: {0}")]
    Envelope(#[source] time::error::Format),

    #[error("failed to publish record: {0}")]
    Publish(#[from] PublishError),
}

/// What happened to a change that was dispatched without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The entity type has no routing entry.
    NotRouted,
    /// A record was handed to the broker.
    Published { topic: String },
}

pub struct Dispatcher {
    routing: Arc<RoutingTable>,
    envelopes: EnvelopeBuilder,
    publisher: Publisher,
}

impl Dispatcher {
    pub fn new(routing: Arc<RoutingTable>, envelopes: EnvelopeBuilder, publisher: Publisher) -> Self {
        Self {
            routing,
            envelopes,
            publisher,
        }
    }

    /// Run the Dispatcher.
    ///
    /// On shutdown the queue is closed and whatever is still queued is
    /// dispatched before returning.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>, mut change_rx: ChangeReceiver) {
        info!(routes = self.routing.len(), "Dispatcher started");

        loop {
            tokio::select! {
                biased;

                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Dispatcher received shutdown signal");
                        break;
                    }
                }

                Some(change) = change_rx.recv() => {
                    self.handle(change).await;
                }

                else => {
                    info!("Dispatch queue closed");
                    break;
                }
            }
        }

        change_rx.close();
        let mut drained = 0usize;
        while let Some(change) = change_rx.recv().await {
            self.handle(change).await;
            drained += 1;
        }

        info!(drained, "Dispatcher shutdown complete");
    }

    async fn handle(&self, change: CommittedChange) {
        let kind = change.kind;
        let type_name = change.type_name().to_string();
        match self.process(change).await {
            Ok(DispatchOutcome::Published { topic }) => {
                info!(%kind, %type_name, %topic, "Dispatched committed change");
            }
            Ok(DispatchOutcome::NotRouted) => {
                debug!(%kind, %type_name, "No route for entity type, skipping");
            }
            Err(e) => {
                error!(%kind, %type_name, error = %e, "Failed to dispatch committed change");
            }
        }
    }
}

impl Processor<CommittedChange> for Dispatcher {
    type Output = DispatchOutcome;
    type Error = DispatchError;

    async fn process(&self, change: CommittedChange) -> Result<DispatchOutcome, DispatchError> {
        let Some(entry) = self.routing.lookup(change.type_name()) else {
            return Ok(DispatchOutcome::NotRouted);
        };

        let payload = flatten(change.entity.as_ref(), entry.flatten_mode)?;
        let type_name = change.type_name().to_string();
        drop(change);

        let envelope = self
            .envelopes
            .build(entry, &type_name, payload)
            .map_err(DispatchError::Envelope)?;
        let topic = envelope.topic.clone();
        self.publisher.publish(envelope).await?;

        Ok(DispatchOutcome::Published { topic })
    }
}
