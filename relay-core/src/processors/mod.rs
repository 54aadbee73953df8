//! Event processors.
//!
//! - `Dispatcher`: Receives `CommittedChange`, publishes one record per routed change

pub mod dispatcher;

pub use dispatcher::{DispatchError, DispatchOutcome, Dispatcher};
