//! Dispatch queue between the commit hook and the worker.
//!
//! The queue is unbounded unless a capacity is configured. A bounded queue
//! never blocks the committing thread: a change offered while it is full is
//! dropped and logged.

use super::types::CommittedChange;
use crate::entities::Entity;
use relay_sdk::objects::ChangeKind;
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Why a change could not be queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnqueueError {
    #[error("dispatch queue is full")]
    Full,
    #[error("dispatch queue is closed")]
    Closed,
}

/// Producer side of the dispatch queue. Cheap to clone.
#[derive(Debug, Clone)]
pub enum ChangeSender {
    Unbounded(mpsc::UnboundedSender<CommittedChange>),
    Bounded(mpsc::Sender<CommittedChange>),
}

impl ChangeSender {
    /// Queue a change without waiting.
    pub fn offer(&self, change: CommittedChange) -> Result<(), EnqueueError> {
        match self {
            ChangeSender::Unbounded(tx) => tx.send(change).map_err(|_| EnqueueError::Closed),
            ChangeSender::Bounded(tx) => tx.try_send(change).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => EnqueueError::Full,
                mpsc::error::TrySendError::Closed(_) => EnqueueError::Closed,
            }),
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            ChangeSender::Unbounded(tx) => tx.is_closed(),
            ChangeSender::Bounded(tx) => tx.is_closed(),
        }
    }
}

/// Consumer side of the dispatch queue, owned by the worker.
#[derive(Debug)]
pub enum ChangeReceiver {
    Unbounded(mpsc::UnboundedReceiver<CommittedChange>),
    Bounded(mpsc::Receiver<CommittedChange>),
}

impl ChangeReceiver {
    pub async fn recv(&mut self) -> Option<CommittedChange> {
        match self {
            ChangeReceiver::Unbounded(rx) => rx.recv().await,
            ChangeReceiver::Bounded(rx) => rx.recv().await,
        }
    }

    /// Stop accepting new changes. Already queued changes can still be
    /// received.
    pub fn close(&mut self) {
        match self {
            ChangeReceiver::Unbounded(rx) => rx.close(),
            ChangeReceiver::Bounded(rx) => rx.close(),
        }
    }
}

/// Create the dispatch queue.
///
/// `None` gives an unbounded queue.
pub fn change_channel(capacity: Option<NonZeroUsize>) -> (ChangeSender, ChangeReceiver) {
    match capacity {
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (ChangeSender::Unbounded(tx), ChangeReceiver::Unbounded(rx))
        }
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.get());
            (ChangeSender::Bounded(tx), ChangeReceiver::Bounded(rx))
        }
    }
}

/// Post-commit hook called by the persistence layer.
///
/// Implementations must return promptly and must not fail the commit.
pub trait OnCommittedChange: Send + Sync {
    fn on_committed_change(&self, kind: ChangeKind, entity: Arc<dyn Entity>);
}

impl OnCommittedChange for ChangeSender {
    fn on_committed_change(&self, kind: ChangeKind, entity: Arc<dyn Entity>) {
        let change = CommittedChange::new(kind, entity);
        let type_name = change.type_name().to_string();
        match self.offer(change) {
            Ok(()) => debug!(%kind, %type_name, "Queued committed change"),
            Err(EnqueueError::Full) => {
                warn!(%kind, %type_name, "Dispatch queue full, dropping committed change")
            }
            Err(EnqueueError::Closed) => {
                warn!(%kind, %type_name, "Dispatch queue closed, dropping committed change")
            }
        }
    }
}
