//! Shared constants for the canvas crate.

// ── Layout ──────────────────────────────────────────────────────

/// Space reserved around the canvas, in CSS pixels, when fitting it to the window.
pub const VIEWPORT_MARGIN_PX: f64 = 30.0;

// ── Colors ──────────────────────────────────────────────────────

/// Canvas background behind the image.
pub const BACKGROUND_COLOR: &str = "#FFF";

/// Fill of the box drawn behind a marker label.
pub const LABEL_BOX_COLOR: &str = "#666";

/// Opacity of the label box.
pub const LABEL_BOX_ALPHA: f64 = 0.7;

/// Label text color.
pub const LABEL_TEXT_COLOR: &str = "#000";

/// Font used for marker labels.
pub const LABEL_FONT: &str = "12px sans-serif";

// ── Marker sprite ───────────────────────────────────────────────

/// Width of the marker pin sprite in display pixels.
pub const MARKER_WIDTH_PX: f64 = 24.0;

/// Height of the marker pin sprite in display pixels. The tip sits at the bottom edge.
pub const MARKER_HEIGHT_PX: f64 = 40.0;

/// Height of the label box in display pixels.
pub const LABEL_HEIGHT_PX: f64 = 20.0;

/// Horizontal padding inside the label box.
pub const LABEL_PADDING_PX: f64 = 4.0;

/// Gap between the top of the sprite and the bottom of the label box.
pub const LABEL_GAP_PX: f64 = 2.0;

/// Where the browser loads the marker sprite from.
pub const MARKER_SPRITE_URL: &str = "static/marker.png";

// ── DOM ─────────────────────────────────────────────────────────

/// Element id of the drawing canvas.
pub const CANVAS_ELEMENT_ID: &str = "imgCanvas";

/// Element id of the image selection list.
pub const IMAGE_LIST_ELEMENT_ID: &str = "imageSelectBox";

/// Path of the server push channel.
pub const STREAM_PATH: &str = "/stream";

/// Element id of the point selection list.
pub const POINT_LIST_ELEMENT_ID: &str = "pointSelectBox";

/// Text of the point list entry that clears the selection.
pub const NO_POINT_LABEL: &str = "(none)";
