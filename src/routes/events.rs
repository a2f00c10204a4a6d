//! Tools-panel API: read the current snapshot, post select/add/remove events.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::warn;
use wire::SyncEvent;

use crate::services::points::PointsError;
use crate::services::sync;
use crate::state::AppState;

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

pub(crate) fn points_error_to_status(err: PointsError) -> StatusCode {
    match err {
        PointsError::UnknownPoint(_) => StatusCode::NOT_FOUND,
    }
}

/// Snapshot returned after a tools-panel event.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// The snapshot broadcast to subscribers.
    pub state: SyncEvent,
    /// Number of stream subscribers that received it.
    pub delivered: usize,
}

pub async fn get_state(State(state): State<AppState>) -> Json<SyncEvent> {
    Json(sync::snapshot(&state).await)
}

pub async fn post_event(State(state): State<AppState>, body: String) -> Result<Json<EventResponse>, StatusCode> {
    let message = wire::decode_client_message(&body).map_err(|e| {
        warn!(error = %e, "rejecting malformed tools event");
        StatusCode::BAD_REQUEST
    })?;
    let applied = sync::apply_message(&state, message).await.map_err(|e| {
        warn!(error = %e, "tools event rejected");
        points_error_to_status(e)
    })?;
    Ok(Json(EventResponse { state: applied.event, delivered: applied.delivered }))
}
