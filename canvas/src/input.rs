//! Input model: what the user has selected and where they clicked.
//!
//! `Selection` is the persistent UI state read by both the interaction
//! handler and the renderer. `PointerDown` carries the raw browser event
//! coordinates together with the canvas origin, so the engine can derive
//! display-space positions without touching the DOM.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::store::{ImageId, PointId};
use crate::transform::Point;

/// Persistent selection state visible to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Point that new clicks are assigned to. Clicks are ignored while `None`.
    pub selected_point: Option<PointId>,
    /// Image chosen for display (it may still be loading).
    pub current_image: Option<ImageId>,
}

/// A pointer-down event on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    /// Event position in client (viewport) coordinates.
    pub client: Point,
    /// Top-left of the canvas bounding box in client coordinates.
    pub canvas_origin: Point,
}

impl PointerDown {
    #[must_use]
    pub fn new(client: Point, canvas_origin: Point) -> Self {
        Self { client, canvas_origin }
    }

    /// Event position relative to the canvas top-left, in display pixels.
    #[must_use]
    pub fn display_point(&self) -> Point {
        Point::new(self.client.x - self.canvas_origin.x, self.client.y - self.canvas_origin.y)
    }
}
