//! Points service: the authoritative annotation state.
//!
//! DESIGN
//! ======
//! `PointsState` is plain data with synchronous operations so it can be
//! tested without a runtime. Handlers take the `AppState` write lock, apply
//! one operation, release the lock and then broadcast a fresh snapshot (see
//! [`super::sync`]).
//!
//! A point id is known once it has been added through the tools panel or
//! appears on any image. Only known points can be selected.

use std::collections::BTreeSet;
use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;
use wire::{ClientMessage, ImageId, PointId, PointsByImage, PointsForImage, SyncEvent};

#[cfg(test)]
#[path = "points_test.rs"]
mod points_test;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PointsError {
    #[error("unknown point: {0}")]
    UnknownPoint(PointId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsState {
    /// Measurements per image. Every catalog image has an entry, possibly empty.
    pub points: PointsByImage,
    /// Points added through the tools panel, placed or not.
    pub registered: BTreeSet<PointId>,
    pub selected_point: Option<PointId>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl PointsState {
    /// State for a fresh catalog: every image listed, no points.
    #[must_use]
    pub fn new(image_ids: impl IntoIterator<Item = ImageId>) -> Self {
        Self { points: image_ids.into_iter().map(|id| (id, PointsForImage::new())).collect(), ..Self::default() }
    }

    /// Whether `point_id` is registered or placed on any image.
    #[must_use]
    pub fn is_known(&self, point_id: &str) -> bool {
        self.registered.contains(point_id) || self.points.values().any(|pts| pts.contains_key(point_id))
    }

    /// Make `point_id` the active point, or clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`PointsError::UnknownPoint`] if the point does not exist.
    pub fn select_point(&mut self, point_id: Option<PointId>) -> Result<(), PointsError> {
        if let Some(id) = &point_id {
            if !self.is_known(id) {
                return Err(PointsError::UnknownPoint(id.clone()));
            }
        }
        self.selected_point = point_id;
        Ok(())
    }

    /// Register a new point under a fresh id and make it active.
    pub fn add_point(&mut self) -> PointId {
        let point_id = Uuid::new_v4().to_string();
        self.registered.insert(point_id.clone());
        self.selected_point = Some(point_id.clone());
        info!(%point_id, "point added");
        point_id
    }

    /// Delete the active point from every image and clear the selection.
    /// Returns the removed id, or `None` when nothing was selected.
    pub fn remove_selected(&mut self) -> Option<PointId> {
        let point_id = self.selected_point.take()?;
        self.registered.remove(&point_id);
        for pts in self.points.values_mut() {
            pts.remove(&point_id);
        }
        info!(%point_id, "point removed");
        Some(point_id)
    }

    /// Apply one tools-panel message.
    ///
    /// # Errors
    ///
    /// Propagates [`PointsError::UnknownPoint`] from [`Self::select_point`].
    pub fn apply(&mut self, message: ClientMessage) -> Result<(), PointsError> {
        match message {
            ClientMessage::SelectPoint { point_id } => self.select_point(point_id),
            ClientMessage::AddPoint => {
                self.add_point();
                Ok(())
            }
            ClientMessage::RemovePoint => {
                self.remove_selected();
                Ok(())
            }
        }
    }

    /// Every known point id: registered or placed on any image.
    #[must_use]
    pub fn point_ids(&self) -> BTreeSet<PointId> {
        let mut ids = self.registered.clone();
        ids.extend(self.points.values().flat_map(|pts| pts.keys().cloned()));
        ids
    }

    /// Full snapshot stamped with `now`.
    #[must_use]
    pub fn snapshot(&self, now: SystemTime) -> SyncEvent {
        SyncEvent {
            time: wire::unix_seconds(now),
            points: self.points.clone(),
            selected_point: self.selected_point.clone(),
            point_ids: self.point_ids(),
        }
    }
}
