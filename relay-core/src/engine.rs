//! Engine wiring: dispatch queue, worker task and shutdown.

use crate::config::{EngineConfig, RoutingTable};
use crate::entities::Entity;
use crate::envelope::EnvelopeBuilder;
use crate::events::{ChangeSender, OnCommittedChange, change_channel};
use crate::processors::Dispatcher;
use crate::publisher::{BrokerClient, Publisher};
use relay_sdk::objects::ChangeKind;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::info;

/// A running relay: one dispatch worker fed by the commit hook.
///
/// Must be started from within a tokio runtime.
pub struct RelayEngine {
    sender: ChangeSender,
    shutdown_tx: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl RelayEngine {
    pub fn start(
        config: EngineConfig,
        routing: RoutingTable,
        client: Arc<dyn BrokerClient>,
    ) -> Self {
        let (sender, change_rx) = change_channel(config.queue_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(
            routes = routing.len(),
            queue_capacity = ?config.queue_capacity,
            include_type_name_header = config.include_type_name_header,
            "Starting relay engine"
        );

        let dispatcher = Dispatcher::new(
            Arc::new(routing),
            EnvelopeBuilder::new(config.include_type_name_header),
            Publisher::new(client),
        );
        let worker = tokio::spawn(dispatcher.run(shutdown_rx, change_rx));

        Self {
            sender,
            shutdown_tx,
            worker,
        }
    }

    /// Commit hook handle to register with the persistence layer.
    pub fn hook(&self) -> ChangeSender {
        self.sender.clone()
    }

    /// Stop accepting changes, dispatch everything already queued, then
    /// wait for the worker to exit.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down relay engine");
        let _ = self.shutdown_tx.send(true);
        drop(self.sender);
        self.worker.await
    }
}

impl OnCommittedChange for RelayEngine {
    fn on_committed_change(&self, kind: ChangeKind, entity: Arc<dyn Entity>) {
        self.sender.on_committed_change(kind, entity);
    }
}
