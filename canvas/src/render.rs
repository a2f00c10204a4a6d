//! Rendering: draws the background image and its markers onto a [`Surface`].
//!
//! This module receives a read-only [`Scene`] and produces pixels. It never
//! mutates annotation or selection state. Output is a pure function of the
//! scene, so two consecutive full redraws issue identical drawing calls.
//!
//! All fallible drawing calls propagate errors via `Result<(), RenderError>`.
//! The top-level caller ([`crate::engine::Engine`]) logs the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{
    BACKGROUND_COLOR, LABEL_BOX_ALPHA, LABEL_BOX_COLOR, LABEL_GAP_PX, LABEL_HEIGHT_PX, LABEL_PADDING_PX,
    LABEL_TEXT_COLOR, MARKER_HEIGHT_PX, MARKER_WIDTH_PX,
};
use crate::store::{AnnotationStore, Measurement};
use crate::transform::{Point, Size, Transform};

/// Failure reported by a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(String),
}

/// Drawing capability: the primitives the pipeline needs, in display pixels.
pub trait Surface {
    /// Resize the drawing area. Resizing discards existing pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing surface cannot be resized.
    fn resize(&mut self, size: Size) -> Result<(), RenderError>;

    /// Fill the whole surface with `color`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fill fails.
    fn clear(&mut self, color: &str) -> Result<(), RenderError>;

    /// Draw the loaded background image into the given rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be drawn.
    fn draw_image(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), RenderError>;

    /// Draw the marker sprite into the given rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the sprite cannot be drawn.
    fn draw_sprite(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), RenderError>;

    /// Width of `text` in the label font.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be measured.
    fn measure_text(&mut self, text: &str) -> Result<f64, RenderError>;

    /// Fill a rectangle with `color` at opacity `alpha`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fill fails.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str, alpha: f64)
    -> Result<(), RenderError>;

    /// Draw `text` in the label font, centered horizontally and vertically on `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be drawn.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) -> Result<(), RenderError>;
}

/// The image being displayed together with its fit-to-canvas transform.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub image_id: &'a str,
    pub transform: Transform,
}

/// Read-only inputs for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub store: &'a AnnotationStore,
    /// `None` while no image is ready to draw.
    pub view: Option<View<'a>>,
    pub canvas: Size,
}

/// A drawable pin: a normalized position, optionally tied to a point id.
///
/// Identified markers are labelled with their point id; free-position markers
/// are labelled with their source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker<'a> {
    pub norm: Point,
    pub point_id: Option<&'a str>,
}

impl<'a> Marker<'a> {
    /// Marker for a stored measurement.
    #[must_use]
    pub fn identified(measurement: &'a Measurement) -> Self {
        Self { norm: measurement.norm(), point_id: Some(measurement.point_id.as_str()) }
    }

    /// Marker at an arbitrary position with no point id, labelled with its
    /// source-image pixel coordinates.
    ///
    /// The page never draws one: clicks without a selected point are ignored
    /// and every stored measurement is identified. It is the position-only
    /// form of the same pin, for hosts that annotate raw positions.
    #[must_use]
    pub fn free(norm: Point) -> Self {
        Self { norm, point_id: None }
    }

    /// Label text drawn above the pin.
    #[must_use]
    pub fn label(&self, transform: &Transform) -> String {
        match self.point_id {
            Some(id) => id.to_owned(),
            None => {
                let px = transform.normalized_to_image(self.norm);
                format!("{:.0}, {:.0}", px.x, px.y)
            }
        }
    }
}

/// Resize, clear, draw the current image scaled to fit, then every marker of
/// that image. Stops after clearing when no image is ready.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn full_redraw(surface: &mut dyn Surface, scene: &Scene<'_>) -> Result<(), RenderError> {
    surface.resize(scene.canvas)?;
    surface.clear(BACKGROUND_COLOR)?;

    let Some(view) = scene.view else {
        return Ok(());
    };

    let shown = view.transform.display_size();
    surface.draw_image(0.0, 0.0, shown.width, shown.height)?;

    for measurement in scene.store.get(view.image_id).values() {
        draw_marker(surface, &view.transform, &Marker::identified(measurement))?;
    }
    Ok(())
}

/// Draw a single measurement on top of the current frame without clearing.
///
/// Only valid right after a [`full_redraw`]; skipped when the measurement
/// belongs to another image or nothing is displayed.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw_one(surface: &mut dyn Surface, scene: &Scene<'_>, measurement: &Measurement) -> Result<(), RenderError> {
    let Some(view) = scene.view else {
        return Ok(());
    };
    if view.image_id != measurement.image_id {
        return Ok(());
    }
    draw_marker(surface, &view.transform, &Marker::identified(measurement))
}

/// Draw a pin with its tip at the marker position and its label above it.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw_marker(surface: &mut dyn Surface, transform: &Transform, marker: &Marker<'_>) -> Result<(), RenderError> {
    let tip = transform.to_display(marker.norm);
    surface.draw_sprite(tip.x - MARKER_WIDTH_PX / 2.0, tip.y - MARKER_HEIGHT_PX, MARKER_WIDTH_PX, MARKER_HEIGHT_PX)?;

    let label = marker.label(transform);
    let text_width = surface.measure_text(&label)?;
    let box_width = text_width + 2.0 * LABEL_PADDING_PX;
    let box_top = tip.y - MARKER_HEIGHT_PX - LABEL_GAP_PX - LABEL_HEIGHT_PX;

    surface.fill_rect(tip.x - box_width / 2.0, box_top, box_width, LABEL_HEIGHT_PX, LABEL_BOX_COLOR, LABEL_BOX_ALPHA)?;
    surface.fill_text(&label, tip.x, box_top + LABEL_HEIGHT_PX / 2.0, LABEL_TEXT_COLOR)
}
