use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use relay_core::entities::{Entity, RecordEntity, RecordError};
use relay_core::events::{CommittedChange, EnqueueError};
use relay_sdk::objects::ChangeNotification;
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
struct Accepted {
    status: &'static str,
}

/// `POST /changes`: queue a committed change for publication.
///
/// The record is converted up front so a malformed record is rejected here
/// instead of failing later on the worker. Acceptance only means the change
/// was queued.
pub(super) async fn submit_change(
    State(state): State<AppState>,
    Json(notification): Json<ChangeNotification>,
) -> Result<impl IntoResponse, ChangesApiError> {
    let kind = notification.kind;
    let entity = RecordEntity::try_from(notification.entity).map_err(ChangesApiError::Record)?;
    let type_name = entity.type_name().to_string();

    state
        .changes
        .offer(CommittedChange::new(kind, Arc::new(entity)))
        .map_err(ChangesApiError::Enqueue)?;

    tracing::debug!(%kind, %type_name, "Accepted change notification");
    Ok((StatusCode::ACCEPTED, Json(Accepted { status: "accepted" })))
}

/// Errors that can occur in the change intake handler.
#[derive(Debug)]
pub(super) enum ChangesApiError {
    /// The record could not be turned into an entity.
    Record(RecordError),
    /// The dispatch queue refused the change.
    Enqueue(EnqueueError),
}

impl IntoResponse for ChangesApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ChangesApiError::Record(e) => {
                tracing::warn!(error = %e, "Rejected malformed change record");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            ChangesApiError::Enqueue(e) => {
                tracing::warn!(error = %e, "Dispatch queue refused change");
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
            }
        }
    }
}
