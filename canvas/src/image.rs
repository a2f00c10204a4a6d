//! Image load lifecycle.
//!
//! Loading the background image is the only asynchronous step in the engine.
//! Nothing may be drawn or transformed until the browser reports the image's
//! natural size, and a rapid switch can leave an older load completing after a
//! newer one was requested. `LoadState` makes both rules explicit: only the
//! most recently requested image can become `Ready`.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use crate::store::ImageId;
use crate::transform::Size;

/// Where the server serves image bytes for `image_id`.
#[must_use]
pub fn image_path(image_id: &str) -> String {
    format!("image/{image_id}")
}

/// Lifecycle of the displayed image.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// Nothing requested yet, or the last request failed.
    #[default]
    NoImage,
    /// A request is in flight; only its completion is accepted.
    Loading(ImageId),
    /// The image is decoded and its natural size is known.
    Ready { image_id: ImageId, size: Size },
}

/// Result of reporting a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The completion matched the pending request; the state is now `Ready`.
    Ready,
    /// The completion belongs to an older or unknown request and was ignored.
    Stale,
}

impl LoadState {
    /// Start loading `image_id`, superseding any in-flight request.
    pub fn begin(&mut self, image_id: ImageId) {
        *self = Self::Loading(image_id);
    }

    /// Report that `image_id` finished loading with `size`.
    pub fn complete(&mut self, image_id: &str, size: Size) -> LoadOutcome {
        match self {
            Self::Loading(pending) if pending == image_id => {
                *self = Self::Ready { image_id: image_id.to_owned(), size };
                LoadOutcome::Ready
            }
            _ => LoadOutcome::Stale,
        }
    }

    /// Report that loading `image_id` failed. Returns `true` if it was the
    /// pending request, which leaves nothing to display.
    pub fn fail(&mut self, image_id: &str) -> bool {
        match self {
            Self::Loading(pending) if pending == image_id => {
                *self = Self::NoImage;
                true
            }
            _ => false,
        }
    }

    /// Forget any image.
    pub fn reset(&mut self) {
        *self = Self::NoImage;
    }

    /// The ready image and its natural size, if any.
    #[must_use]
    pub fn ready(&self) -> Option<(&str, Size)> {
        match self {
            Self::Ready { image_id, size } => Some((image_id.as_str(), *size)),
            _ => None,
        }
    }

    /// The image currently being loaded, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        match self {
            Self::Loading(image_id) => Some(image_id.as_str()),
            _ => None,
        }
    }

    /// Whether `image_id` is ready to draw.
    #[must_use]
    pub fn is_ready(&self, image_id: &str) -> bool {
        self.ready().is_some_and(|(id, _)| id == image_id)
    }
}
