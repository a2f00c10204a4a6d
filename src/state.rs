//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the authoritative points state and the live stream subscribers,
//! each reached through its own bounded `mpsc` sender.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;
use wire::SyncEvent;

use crate::services::points::PointsState;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub points: Arc<RwLock<PointsState>>,
    /// Stream subscribers: client id -> sender for outgoing snapshots.
    pub clients: Arc<RwLock<HashMap<Uuid, mpsc::Sender<SyncEvent>>>>,
    /// Buffer size of each subscriber channel.
    pub sync_channel_capacity: usize,
}

impl AppState {
    #[must_use]
    pub fn new(points: PointsState, sync_channel_capacity: usize) -> Self {
        Self {
            points: Arc::new(RwLock::new(points)),
            clients: Arc::new(RwLock::new(HashMap::new())),
            sync_channel_capacity: sync_channel_capacity.max(1),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// App state listing `images`, with no points and no subscribers.
    #[must_use]
    pub fn test_app_state(images: &[&str]) -> AppState {
        AppState::new(PointsState::new(images.iter().map(|s| (*s).to_owned())), 8)
    }

    /// Register a bare subscriber channel, bypassing the initial snapshot.
    pub async fn register_client(state: &AppState) -> (Uuid, mpsc::Receiver<SyncEvent>) {
        let client_id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(state.sync_channel_capacity);
        state.clients.write().await.insert(client_id, tx);
        (client_id, rx)
    }
}
