//! Event types flowing from the commit hook to the dispatch worker.

use crate::entities::Entity;
use relay_sdk::objects::ChangeKind;
use std::sync::Arc;

/// A change that has been committed and is waiting to be dispatched.
///
/// The entity handle is held until the worker has flattened it.
#[derive(Debug, Clone)]
pub struct CommittedChange {
    pub kind: ChangeKind,
    pub entity: Arc<dyn Entity>,
}

impl CommittedChange {
    pub fn new(kind: ChangeKind, entity: Arc<dyn Entity>) -> Self {
        Self { kind, entity }
    }

    pub fn type_name(&self) -> &str {
        self.entity.type_name()
    }
}
