//! Coordinate transform between normalized annotation space and display pixels.
//!
//! Three spaces are involved:
//!
//! - **normalized**: relative to the image center, divided by the larger image
//!   side, so points inside the image fall roughly in `[-0.5, 0.5]`;
//! - **image**: pixels of the source image, origin at its top-left corner;
//! - **display**: canvas pixels, where the image is drawn at `(0, 0)` scaled
//!   uniformly by the fit-to-canvas factor.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

/// A point in normalized, image or display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels, for either an image or the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The larger of the two sides; the unit of normalized coordinates.
    #[must_use]
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Whether both sides are finite and strictly positive.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Why a transform could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// No image has finished loading, so there is no scale to apply.
    #[error("no image loaded")]
    NoImageLoaded,
    /// The image or canvas has no area, or the scale is not a positive finite number.
    #[error("degenerate transform: image {image:?}, scale {scale}")]
    Degenerate { image: Size, scale: f64 },
}

/// Mapping between normalized coordinates and display pixels for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    image: Size,
    scale: f64,
}

impl Transform {
    /// Build a transform for `image` drawn at `scale`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Degenerate`] when the image is empty or the
    /// scale is not positive and finite.
    pub fn new(image: Size, scale: f64) -> Result<Self, TransformError> {
        if !image.is_drawable() || !scale.is_finite() || scale <= 0.0 {
            return Err(TransformError::Degenerate { image, scale });
        }
        Ok(Self { image, scale })
    }

    /// Fit `image` inside `canvas`, preserving aspect ratio, anchored top-left.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Degenerate`] when either size has no area.
    pub fn fit(image: Size, canvas: Size) -> Result<Self, TransformError> {
        let scale = (canvas.width / image.width).min(canvas.height / image.height);
        Self::new(image, scale)
    }

    /// Source image dimensions.
    #[must_use]
    pub fn image(&self) -> Size {
        self.image
    }

    /// Uniform image-to-display multiplier.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size of the scaled image on the canvas.
    #[must_use]
    pub fn display_size(&self) -> Size {
        Size::new(self.image.width * self.scale, self.image.height * self.scale)
    }

    /// Normalized coordinates to source-image pixels.
    #[must_use]
    pub fn normalized_to_image(&self, norm: Point) -> Point {
        let side = self.image.max_side();
        Point {
            x: self.image.width / 2.0 + norm.x * side,
            y: self.image.height / 2.0 + norm.y * side,
        }
    }

    /// Source-image pixels to normalized coordinates.
    #[must_use]
    pub fn image_to_normalized(&self, pixel: Point) -> Point {
        let side = self.image.max_side();
        Point {
            x: (pixel.x - self.image.width / 2.0) / side,
            y: (pixel.y - self.image.height / 2.0) / side,
        }
    }

    /// Normalized coordinates to display pixels.
    #[must_use]
    pub fn to_display(&self, norm: Point) -> Point {
        let pixel = self.normalized_to_image(norm);
        Point { x: pixel.x * self.scale, y: pixel.y * self.scale }
    }

    /// Display pixels to normalized coordinates. Exact inverse of [`Self::to_display`].
    #[must_use]
    pub fn to_normalized(&self, display: Point) -> Point {
        self.image_to_normalized(Point { x: display.x / self.scale, y: display.y / self.scale })
    }
}

/// Normalized coordinates to display pixels for an image drawn at `scale`.
///
/// `scale` is `None` until an image has finished loading.
///
/// # Errors
///
/// [`TransformError::NoImageLoaded`] without a scale,
/// [`TransformError::Degenerate`] for an empty image or a bad scale.
pub fn to_display(norm: Point, image: Size, scale: Option<f64>) -> Result<Point, TransformError> {
    let scale = scale.ok_or(TransformError::NoImageLoaded)?;
    Ok(Transform::new(image, scale)?.to_display(norm))
}

/// Display pixels to normalized coordinates for an image drawn at `scale`.
///
/// # Errors
///
/// Same conditions as [`to_display`].
pub fn to_normalized(display: Point, image: Size, scale: Option<f64>) -> Result<Point, TransformError> {
    let scale = scale.ok_or(TransformError::NoImageLoaded)?;
    Ok(Transform::new(image, scale)?.to_normalized(display))
}
