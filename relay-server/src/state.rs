//! Application state shared across all request handlers.

use relay_core::events::ChangeSender;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around.
#[derive(Clone)]
pub struct AppState {
    /// Producer side of the engine's dispatch queue.
    pub changes: ChangeSender,
}

impl AppState {
    pub fn new(changes: ChangeSender) -> Self {
        Self { changes }
    }
}
