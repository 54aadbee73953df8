//! Runtime configuration of the relay engine.
//!
//! These types are built once at startup and never change afterwards. The
//! file format and loading live in the server crate.

mod routing;

pub use relay_sdk::config::RoutingEntry;
pub use routing::RoutingTable;

use std::num::NonZeroUsize;

/// Engine-wide settings.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Append a `TypeName` header carrying the entity type name.
    pub include_type_name_header: bool,
    /// Bound of the dispatch queue. `None` keeps the queue unbounded; with a
    /// bound, changes offered to a full queue are dropped.
    pub queue_capacity: Option<NonZeroUsize>,
}
