//! Shared wire model for the annotation push channel.
//!
//! This crate owns the JSON representation used by both the `annotator`
//! server and the `canvas` browser engine. The server emits [`SyncEvent`]s as
//! server-sent events named [`SYNC_EVENT_NAME`]; the tools panel posts
//! [`ClientMessage`]s back.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize};

/// Name of the server-sent event carrying a full annotation snapshot.
pub const SYNC_EVENT_NAME: &str = "sync";

/// Opaque key naming an image resource.
pub type ImageId = String;

/// Opaque key naming a logical annotation point shared across images.
pub type PointId = String;

/// Normalized `[x, y]` coordinates of one point on one image.
pub type NormalizedXY = [f64; 2];

/// Points of a single image keyed by point id.
pub type PointsForImage = BTreeMap<PointId, NormalizedXY>;

/// Every image's points, keyed by image id.
pub type PointsByImage = BTreeMap<ImageId, PointsForImage>;

/// Error returned by [`decode_sync`] and [`decode_client_message`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload is not valid JSON or does not match the expected shape.
    #[error("failed to decode payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Full annotation snapshot pushed by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncEvent {
    /// Unix time in seconds when the snapshot was taken.
    #[serde(default)]
    pub time: f64,
    /// Every listed image and its points. Required: a payload without it is malformed.
    pub points: PointsByImage,
    /// Point that new clicks are assigned to, if any.
    #[serde(default, deserialize_with = "deserialize_point_id")]
    pub selected_point: Option<PointId>,
    /// Points created through the tools panel, including ones not yet placed
    /// on any image. Absent from older producers.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub point_ids: BTreeSet<PointId>,
}

impl SyncEvent {
    /// Image ids in listing order.
    #[must_use]
    pub fn image_ids(&self) -> Vec<ImageId> {
        self.points.keys().cloned().collect()
    }

    /// Every point id the snapshot mentions: created, placed on any image or
    /// selected. Sorted, without duplicates.
    #[must_use]
    pub fn known_point_ids(&self) -> Vec<PointId> {
        let mut ids = self.point_ids.clone();
        ids.extend(self.points.values().flat_map(|pts| pts.keys().cloned()));
        ids.extend(self.selected_point.iter().cloned());
        ids.into_iter().collect()
    }
}

/// Message posted by the tools panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Make `point_id` the active point, or clear the selection with `null`.
    SelectPoint {
        #[serde(default, deserialize_with = "deserialize_point_id")]
        point_id: Option<PointId>,
    },
    /// Create a new point and make it active.
    AddPoint,
    /// Remove the active point from every image.
    RemovePoint,
}

/// Point ids travel as strings, but older producers emit bare numbers.
fn deserialize_point_id<'de, D>(deserializer: D) -> Result<Option<PointId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    }))
}

/// Encode a snapshot as the JSON body of a `sync` event.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if a coordinate cannot be represented (never
/// for finite values).
pub fn encode_sync(event: &SyncEvent) -> Result<String, CodecError> {
    Ok(serde_json::to_string(event)?)
}

/// Decode the JSON body of a `sync` event.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed JSON or a missing `points` field.
pub fn decode_sync(data: &str) -> Result<SyncEvent, CodecError> {
    Ok(serde_json::from_str(data)?)
}

/// Decode a tools-panel message.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed JSON or an unknown `event` tag.
pub fn decode_client_message(data: &str) -> Result<ClientMessage, CodecError> {
    Ok(serde_json::from_str(data)?)
}

/// Seconds since the Unix epoch, as carried in [`SyncEvent::time`].
#[must_use]
pub fn unix_seconds(at: SystemTime) -> f64 {
    at.duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
