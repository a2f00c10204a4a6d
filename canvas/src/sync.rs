//! Sync client: decoding push-channel snapshots and choosing what to show.
//!
//! The server pushes a full [`SyncEvent`] on every change. Applying one is a
//! wholesale replacement (see [`crate::engine::EngineCore::apply_sync`]), so a
//! later event always supersedes an earlier one and events need no merging.
//!
//! ERROR HANDLING
//! ==============
//! A payload that does not decode is reported as [`SyncError::Parse`]; the
//! engine logs it and keeps its previous state.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

pub use wire::SyncEvent;

use crate::store::ImageId;

/// Failure to apply a push message.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("malformed sync payload: {0}")]
    Parse(#[from] wire::CodecError),
}

/// Decode the body of a `sync` event.
///
/// # Errors
///
/// Returns [`SyncError::Parse`] for malformed JSON or a missing `points` field.
pub fn parse(data: &str) -> Result<SyncEvent, SyncError> {
    Ok(wire::decode_sync(data)?)
}

/// Push latency in milliseconds between the snapshot's timestamp and `now_ms`.
#[must_use]
pub fn delay_ms(event: &SyncEvent, now_ms: f64) -> f64 {
    now_ms - (event.time * 1000.0).round()
}

/// What to display after the image list has been replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    /// The current image is still listed; redraw it.
    Keep,
    /// Switch to this image (first listed) because nothing usable is shown.
    Switch(ImageId),
    /// The list is empty; show nothing.
    Clear,
}

/// Decide which image to show for a freshly replaced `image_list`.
#[must_use]
pub fn choose_display(image_list: &[ImageId], current: Option<&str>) -> Display {
    match current {
        Some(id) if image_list.iter().any(|listed| listed == id) => Display::Keep,
        _ => image_list.first().map_or(Display::Clear, |first| Display::Switch(first.clone())),
    }
}
