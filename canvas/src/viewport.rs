//! Window/viewport sizing.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::VIEWPORT_MARGIN_PX;
use crate::transform::Size;

/// Layout settings for fitting the canvas next to the image list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Space left free around the canvas, in CSS pixels.
    pub margin_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { margin_px: VIEWPORT_MARGIN_PX }
    }
}

/// Canvas size for a window of `window` CSS pixels with an image list
/// `list_width` pixels wide. Never negative.
#[must_use]
pub fn canvas_size(window: Size, list_width: f64, config: &ViewportConfig) -> Size {
    Size::new(
        (window.width - list_width - config.margin_px).max(0.0),
        (window.height - config.margin_px).max(0.0),
    )
}
