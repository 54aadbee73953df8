//! Commit notifications and the dispatch queue.
//!
//! # Event Flow
//!
//! 1. The persistence layer calls [`OnCommittedChange::on_committed_change`]
//!    after an insert or update has committed
//! 2. The change is queued as a [`CommittedChange`] without blocking the caller
//! 3. The dispatch worker takes changes off the queue one at a time, in
//!    submission order

pub mod channels;
pub mod types;

pub use channels::{ChangeReceiver, ChangeSender, EnqueueError, OnCommittedChange, change_channel};
pub use types::CommittedChange;
