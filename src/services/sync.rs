//! Sync service: stream subscriptions and snapshot broadcast.
//!
//! DESIGN
//! ======
//! Every change broadcasts a full snapshot, so subscribers never need a
//! diff and a later snapshot always supersedes an earlier one. Delivery is
//! best-effort per subscriber:
//! - full channel: the snapshot is skipped for that subscriber
//! - closed channel: the subscriber is pruned

use std::time::SystemTime;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{info, warn};
use uuid::Uuid;
use wire::{ClientMessage, SyncEvent};

use super::points::PointsError;
use crate::state::AppState;

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

/// Current snapshot.
pub async fn snapshot(state: &AppState) -> SyncEvent {
    state.points.read().await.snapshot(SystemTime::now())
}

/// Register a new subscriber. Its channel already holds the current snapshot.
///
/// The subscriber map stays write-locked from before the snapshot is read
/// until the sender is registered, so any broadcast either precedes the
/// snapshot or reaches the new subscriber. Lock order is clients, then
/// points; [`apply_message`] never holds both.
pub async fn subscribe(state: &AppState) -> (Uuid, mpsc::Receiver<SyncEvent>) {
    let client_id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel(state.sync_channel_capacity);
    let mut clients = state.clients.write().await;
    if tx.try_send(snapshot(state).await).is_err() {
        warn!(%client_id, "initial snapshot not queued");
    }
    clients.insert(client_id, tx);
    info!(%client_id, subscribers = clients.len(), "sync: client subscribed");
    (client_id, rx)
}

/// Send `event` to every subscriber and prune closed ones. Returns the
/// number of subscribers that received it.
pub async fn broadcast(state: &AppState, event: &SyncEvent) -> usize {
    let mut delivered = 0;
    let mut closed = Vec::new();
    {
        let clients = state.clients.read().await;
        for (client_id, tx) in clients.iter() {
            match tx.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => warn!(%client_id, "sync: subscriber lagging, snapshot skipped"),
                Err(TrySendError::Closed(_)) => closed.push(*client_id),
            }
        }
    }

    if !closed.is_empty() {
        let mut clients = state.clients.write().await;
        for client_id in &closed {
            clients.remove(client_id);
        }
        info!(pruned = closed.len(), subscribers = clients.len(), "sync: pruned closed subscribers");
    }
    delivered
}

/// Snapshot produced by an accepted tools-panel message.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub event: SyncEvent,
    /// Subscribers the snapshot was delivered to.
    pub delivered: usize,
}

/// Apply a tools-panel message and broadcast the resulting snapshot.
///
/// # Errors
///
/// Returns the [`PointsError`] of a rejected message; nothing is broadcast.
pub async fn apply_message(state: &AppState, message: ClientMessage) -> Result<Applied, PointsError> {
    let event = {
        let mut points = state.points.write().await;
        points.apply(message)?;
        points.snapshot(SystemTime::now())
    };
    let delivered = broadcast(state, &event).await;
    info!(delivered, selected_point = ?event.selected_point, "sync: snapshot broadcast");
    Ok(Applied { event, delivered })
}
