//! HTTP API handlers.
//!
//! # Endpoints
//!
//! - `POST /changes` – report a committed insert or update

mod changes;

use crate::state::AppState;
use axum::{Router, routing::post};

pub fn router() -> Router<AppState> {
    Router::new().route("/changes", post(changes::submit_change))
}
