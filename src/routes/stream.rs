//! Server-sent event stream of annotation snapshots.
//!
//! LIFECYCLE
//! =========
//! 1. Subscribe: a channel is registered, pre-loaded with the current snapshot
//! 2. Every broadcast snapshot is forwarded as a `sync` event
//! 3. Disconnect: the stream is dropped, closing the channel; the next
//!    broadcast prunes the subscriber

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use wire::{CodecError, SYNC_EVENT_NAME, SyncEvent};

use crate::services::sync;
use crate::state::AppState;

pub async fn handle_stream(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, CodecError>>> {
    let (_client_id, rx) = sync::subscribe(&state).await;
    let events = futures::stream::unfold(rx, |mut rx| async move {
        let snapshot = rx.recv().await?;
        Some((sync_event(&snapshot), rx))
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Encode a snapshot as an SSE `sync` event.
///
/// # Errors
///
/// Returns [`CodecError`] if the snapshot cannot be serialized.
pub fn sync_event(snapshot: &SyncEvent) -> Result<Event, CodecError> {
    Ok(Event::default().event(SYNC_EVENT_NAME).data(wire::encode_sync(snapshot)?))
}
